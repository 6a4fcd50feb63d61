//! Parquet export. One row per game; players are a `List<Struct>` column so the
//! file keeps the same nesting as the JSON tree.

use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use arrow::array::{
    ArrayRef, Int64Builder, ListArray, ListBuilder, StringBuilder, StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use super::{RecordSink, StorageError};
use crate::report::GamesReport;

fn player_fields() -> Fields {
    Fields::from(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("current_name", DataType::Utf8, false),
        Field::new("old_names", string_list_type(), false),
        Field::new("kills", DataType::Int64, false),
        Field::new("deaths", DataType::Int64, false),
        Field::new("suicides", DataType::Int64, false),
        Field::new("favorite_weapon", DataType::Utf8, false),
        Field::new("collected_items", string_list_type(), false),
    ])
}

fn string_list_type() -> DataType {
    DataType::List(Arc::new(Field::new_list_field(DataType::Utf8, true)))
}

fn players_list_field() -> Field {
    Field::new_list_field(DataType::Struct(player_fields()), true)
}

fn build_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("game", DataType::Int64, false),
        Field::new("map", DataType::Utf8, false),
        Field::new("total_kills", DataType::Int64, false),
        Field::new(
            "players",
            DataType::List(Arc::new(players_list_field())),
            false,
        ),
    ]))
}

static GAMES_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(build_schema);

/// Arrow schema of the games table.
pub fn games_schema() -> Arc<Schema> {
    GAMES_SCHEMA.clone()
}

// ─────────────────────────────────────────────────────────────────────────────
// Batch building
// ─────────────────────────────────────────────────────────────────────────────

/// Column builders for the flattened player rows of every game.
struct PlayerColumns {
    id: Int64Builder,
    current_name: StringBuilder,
    old_names: ListBuilder<StringBuilder>,
    kills: Int64Builder,
    deaths: Int64Builder,
    suicides: Int64Builder,
    favorite_weapon: StringBuilder,
    collected_items: ListBuilder<StringBuilder>,
}

impl PlayerColumns {
    fn new() -> Self {
        Self {
            id: Int64Builder::new(),
            current_name: StringBuilder::new(),
            old_names: ListBuilder::new(StringBuilder::new()),
            kills: Int64Builder::new(),
            deaths: Int64Builder::new(),
            suicides: Int64Builder::new(),
            favorite_weapon: StringBuilder::new(),
            collected_items: ListBuilder::new(StringBuilder::new()),
        }
    }

    fn finish(mut self) -> Result<StructArray, arrow::error::ArrowError> {
        StructArray::try_new(
            player_fields(),
            vec![
                Arc::new(self.id.finish()) as ArrayRef,
                Arc::new(self.current_name.finish()),
                Arc::new(self.old_names.finish()),
                Arc::new(self.kills.finish()),
                Arc::new(self.deaths.finish()),
                Arc::new(self.suicides.finish()),
                Arc::new(self.favorite_weapon.finish()),
                Arc::new(self.collected_items.finish()),
            ],
            None,
        )
    }
}

fn append_strings(builder: &mut ListBuilder<StringBuilder>, values: &[String]) {
    for value in values {
        builder.values().append_value(value);
    }
    builder.append(true);
}

pub(crate) fn build_batch(report: &GamesReport) -> Result<RecordBatch, arrow::error::ArrowError> {
    let mut game = Int64Builder::with_capacity(report.games.len());
    let mut map = StringBuilder::new();
    let mut total_kills = Int64Builder::with_capacity(report.games.len());
    let mut players = PlayerColumns::new();
    let mut offsets: Vec<i32> = Vec::with_capacity(report.games.len() + 1);
    offsets.push(0);

    let mut player_rows = 0i32;
    for g in &report.games {
        game.append_value(i64::from(g.game));
        map.append_value(&g.map);
        total_kills.append_value(i64::from(g.total_kills));

        for p in &g.players {
            players.id.append_value(p.id);
            players.current_name.append_value(&p.current_name);
            append_strings(&mut players.old_names, &p.old_names);
            players.kills.append_value(i64::from(p.kills));
            players.deaths.append_value(i64::from(p.deaths));
            players.suicides.append_value(i64::from(p.suicides));
            players.favorite_weapon.append_value(&p.favorite_weapon);
            append_strings(&mut players.collected_items, &p.collected_items);
        }
        player_rows += g.players.len() as i32;
        offsets.push(player_rows);
    }

    let players_array = ListArray::try_new(
        Arc::new(players_list_field()),
        OffsetBuffer::new(offsets.into()),
        Arc::new(players.finish()?),
        None,
    )?;

    let columns: Vec<ArrayRef> = vec![
        Arc::new(game.finish()),
        Arc::new(map.finish()),
        Arc::new(total_kills.finish()),
        Arc::new(players_array),
    ];

    RecordBatch::try_new(games_schema(), columns)
}

// ─────────────────────────────────────────────────────────────────────────────
// Sink
// ─────────────────────────────────────────────────────────────────────────────

pub struct ParquetSink {
    path: PathBuf,
    compression: Compression,
}

impl ParquetSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            compression: Compression::SNAPPY,
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

impl RecordSink for ParquetSink {
    fn format(&self) -> &'static str {
        "parquet"
    }

    fn emit(&mut self, report: &GamesReport) -> Result<PathBuf, StorageError> {
        let parquet_err = |source| StorageError::Parquet {
            path: self.path.clone(),
            source,
        };

        let batch = build_batch(report).map_err(|source| StorageError::Arrow {
            path: self.path.clone(),
            source,
        })?;

        let file = File::create(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .build();

        let mut writer =
            ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(parquet_err)?;
        writer.write(&batch).map_err(parquet_err)?;
        writer.close().map_err(parquet_err)?;

        Ok(self.path.clone())
    }
}
