//! SQL definitions for the mesa database.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata (schema version).
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// The table catalog.
///
/// `join_partners` holds the declared partner codes as a comma-separated
/// list. `events_only` is NULL when the flag was never set.
pub const CREATE_DINING_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dining_tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        capacity INTEGER NOT NULL CHECK (capacity >= 1),
        shape TEXT,
        floor INTEGER,
        venue TEXT NOT NULL,
        joinable INTEGER NOT NULL DEFAULT 0,
        join_partners TEXT NOT NULL DEFAULT '',
        events_only INTEGER,
        personal_events_allowed INTEGER NOT NULL DEFAULT 0,
        corporate_events_allowed INTEGER NOT NULL DEFAULT 0,
        has_tv INTEGER NOT NULL DEFAULT 0,
        is_private INTEGER NOT NULL DEFAULT 0,
        available INTEGER NOT NULL DEFAULT 1,
        note TEXT
    )";

/// The reservation ledger.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        shift TEXT NOT NULL,
        party_size INTEGER NOT NULL CHECK (party_size >= 1),
        usage TEXT NOT NULL,
        assigned_tables TEXT NOT NULL DEFAULT '',
        stage TEXT NOT NULL,
        customer TEXT,
        created_at INTEGER NOT NULL
    )";

/// Occupancy lookups are always scoped to one date and shift.
pub const CREATE_DATE_SHIFT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_date_shift ON reservations(date, shift)";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every catalog SELECT.
pub const TABLE_COLUMNS: &str = "id, code, capacity, shape, floor, venue, joinable, join_partners, \
     events_only, personal_events_allowed, corporate_events_allowed, has_tv, is_private, \
     available, note";

/// Inserts a table, or updates every field of the table with the same code.
pub const UPSERT_TABLE: &str = r"
    INSERT INTO dining_tables
    (code, capacity, shape, floor, venue, joinable, join_partners, events_only,
     personal_events_allowed, corporate_events_allowed, has_tv, is_private, available, note)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
    ON CONFLICT(code) DO UPDATE SET
        capacity = excluded.capacity,
        shape = excluded.shape,
        floor = excluded.floor,
        venue = excluded.venue,
        joinable = excluded.joinable,
        join_partners = excluded.join_partners,
        events_only = excluded.events_only,
        personal_events_allowed = excluded.personal_events_allowed,
        corporate_events_allowed = excluded.corporate_events_allowed,
        has_tv = excluded.has_tv,
        is_private = excluded.is_private,
        available = excluded.available,
        note = excluded.note
";

/// Column list shared by every ledger SELECT.
pub const RESERVATION_COLUMNS: &str =
    "id, date, shift, party_size, usage, assigned_tables, stage, customer, created_at";

/// Inserts a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (date, shift, party_size, usage, assigned_tables, stage, customer, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

/// Changes the stage of one reservation.
pub const UPDATE_RESERVATION_STAGE: &str = "UPDATE reservations SET stage = ? WHERE id = ?";
