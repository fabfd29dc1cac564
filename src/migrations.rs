pub struct Migration {
    pub version: i16,
    pub up: &'static str,
    pub down: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    up: r#"
        CREATE TABLE exchange_rate (
            currency_code TEXT PRIMARY KEY NOT NULL CHECK (length(currency_code) = 3),
            rate_to_base TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE rate_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            currency_code TEXT NOT NULL CHECK (length(currency_code) = 3),
            rate TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        );
        CREATE INDEX idx_rate_history_lookup ON rate_history (currency_code, recorded_at);
    "#,
    down: r#"
        DROP INDEX idx_rate_history_lookup;
        DROP TABLE rate_history;
        DROP TABLE exchange_rate;
    "#,
}];

pub fn latest_version() -> i16 {
    MIGRATIONS.iter().map(|it| it.version).max().unwrap_or(0)
}
