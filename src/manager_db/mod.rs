pub mod errors;
mod models;

use std::sync::{Mutex, MutexGuard};
use rusqlite::{params, Connection};
use crate::manager_db::errors::DBError;
use crate::manager_db::models::WeatherRow;
use crate::models::WeatherInformation;

/// Durable list persistence for weather information
pub trait WeatherStore: Send + Sync {
    /// Appends items after whatever is already stored
    fn save(&self, items: &[WeatherInformation]) -> Result<(), DBError>;

    /// Loads all items in insertion order
    fn load(&self) -> Result<Vec<WeatherInformation>, DBError>;

    fn delete_all_items(&self) -> Result<(), DBError>;

    /// Replaces all stored items with the given ones
    ///
    /// Stores offering transactions must override this so that readers never see
    /// a mix of old and new items.
    fn replace_all(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        self.delete_all_items()?;
        self.save(items)
    }
}

pub struct DB {
    db_conn: Mutex<Connection>,
}

impl DB {

    /// Creates a new instance of DB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, ":memory:" for a transient database
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
            "CREATE TABLE IF NOT EXISTS weather_information (
                position integer primary key,
                is_current_location integer not null,
                name text not null,
                latitude real not null,
                longitude real not null,
                temp_current real not null,
                temp_min real not null,
                temp_max real not null,
                weather_type integer not null,
                forecast text not null
            )",
            [],
        )?;

        Ok(DB { db_conn: Mutex::new(db_conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DBError> {
        self.db_conn.lock().map_err(|e| DBError(e.to_string()))
    }

    /// Inserts items with consecutive positions
    ///
    /// # Arguments
    ///
    /// * 'conn' - connection or transaction to insert with
    /// * 'first_position' - position of the first item
    /// * 'items' - items to insert
    fn insert_items(conn: &Connection, first_position: i64, items: &[WeatherInformation]) -> Result<(), DBError> {
        let mut stmt = conn.prepare(
            "INSERT INTO weather_information
                (position, is_current_location, name, latitude, longitude,
                 temp_current, temp_min, temp_max, weather_type, forecast)
                values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        for (position, item) in (first_position..).zip(items) {
            let row = WeatherRow::from_info(item)?;
            stmt.execute(params![
                position,
                row.is_current_location,
                row.name,
                row.latitude,
                row.longitude,
                row.temp_current,
                row.temp_min,
                row.temp_max,
                row.weather_type,
                row.forecast,
            ])?;
        }

        Ok(())
    }
}

impl WeatherStore for DB {
    fn save(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM weather_information",
            [],
            |row| row.get(0),
        )?;
        Self::insert_items(&tx, next_position, items)?;

        tx.commit()?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<WeatherInformation>, DBError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT is_current_location, name, latitude, longitude,
                    temp_current, temp_min, temp_max, weather_type, forecast
                FROM weather_information
                ORDER BY position;",
        )?;
        let mut rows = stmt.query([])?;

        let mut result: Vec<WeatherInformation> = Vec::new();
        while let Some(row) = rows.next()? {
            let weather_row = WeatherRow {
                is_current_location: row.get(0)?,
                name: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                temp_current: row.get(4)?,
                temp_min: row.get(5)?,
                temp_max: row.get(6)?,
                weather_type: row.get(7)?,
                forecast: row.get(8)?,
            };
            result.push(weather_row.into_info()?);
        }

        Ok(result)
    }

    fn delete_all_items(&self) -> Result<(), DBError> {
        self.conn()?.execute("DELETE FROM weather_information", [])?;
        Ok(())
    }

    fn replace_all(&self, items: &[WeatherInformation]) -> Result<(), DBError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM weather_information", [])?;
        Self::insert_items(&tx, 0, items)?;

        tx.commit()?;
        Ok(())
    }
}

/// Store that keeps nothing, used when the database can't be opened
pub struct NullStore;

impl WeatherStore for NullStore {
    fn save(&self, _items: &[WeatherInformation]) -> Result<(), DBError> { Ok(()) }

    fn load(&self) -> Result<Vec<WeatherInformation>, DBError> { Ok(Vec::new()) }

    fn delete_all_items(&self) -> Result<(), DBError> { Ok(()) }
}
