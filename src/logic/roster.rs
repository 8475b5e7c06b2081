//! Roster sources: the built-in sample roster and CSV files.
//!
//! CSV files carry a header row `name,wins,losses,draws,matchesPlayed`.
//! Whitespace around fields is ignored.

use crate::models::{LeaderboardError, PlayerRecord};
use std::io::Read;
use std::path::Path;

/// The club roster shown when no CSV file is configured.
pub fn sample() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord::new("Player One", 17, 2, 1, 20),
        PlayerRecord::new("Player Two", 17, 4, 1, 22),
        PlayerRecord::new("Player Three", 13, 4, 1, 18),
        PlayerRecord::new("Player Four", 17, 7, 1, 25),
        PlayerRecord::new("Player Five", 13, 1, 1, 15),
        PlayerRecord::new("Player Six", 13, 7, 1, 21),
        PlayerRecord::new("Player Seven", 13, 5, 1, 19),
        PlayerRecord::new("Player Eight", 13, 9, 1, 23),
        PlayerRecord::new("Player Nine", 12, 4, 1, 17),
        PlayerRecord::new("Player Ten", 13, 10, 1, 24),
    ]
}

/// Parse every row of a roster CSV. Fails on the first malformed row.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, LeaderboardError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize::<PlayerRecord>()
        .enumerate()
        .map(|(i, row)| {
            row.map_err(|e| LeaderboardError::InvalidRecord {
                row: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Load a roster CSV from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<PlayerRecord>, LeaderboardError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| LeaderboardError::Io(format!("{}: {}", path.display(), e)))?;
    let records = from_csv_reader(file)?;
    log::info!("Loaded {} player(s) from {}", records.len(), path.display());
    Ok(records)
}
