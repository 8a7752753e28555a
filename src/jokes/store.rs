use crate::database::table::TableRow;
use crate::database::DatabaseError;
use crate::database::StoreConfig;
use crate::error::RustyEtlError;
use crate::jokes::model::Joke;
use crate::jokes::model::StoredJoke;
use crate::jokes::model::JOKES_TABLE;
use crate::jokes::model::JOKE_ID_SEQUENCE;
use duckdb::params_from_iter;
use duckdb::Connection;
use duckdb::Row;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::info;

/// Handle on the `jokes` table, shared by the request handlers.
///
/// Every operation runs on its own connection cloned from the shared handle.
#[derive(Clone)]
pub struct JokeStore {
    connection: Arc<Mutex<Connection>>,
}

impl JokeStore {
    pub fn open(config: &StoreConfig) -> Result<JokeStore, RustyEtlError> {
        let store = JokeStore::from_connection(config.open()?)?;
        info!(database = %config.path.display(), "opened joke store");
        Ok(store)
    }

    /// Creates the table and its id sequence when absent, then checks the table layout.
    pub fn from_connection(connection: Connection) -> Result<JokeStore, RustyEtlError> {
        connection.execute_batch(&format!(
            "CREATE SEQUENCE IF NOT EXISTS {JOKE_ID_SEQUENCE};\n{};",
            JOKES_TABLE.create_sql(true)
        ))?;
        JOKES_TABLE.verify(&connection)?;
        Ok(JokeStore {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn session(&self) -> Result<Connection, RustyEtlError> {
        let connection = self.connection.lock().map_err(|_| DatabaseError::SessionPoisoned)?;
        Ok(connection.try_clone()?)
    }

    /// Inserts all jokes in one transaction.
    pub fn insert_all(&self, jokes: &[Joke]) -> Result<usize, RustyEtlError> {
        let mut connection = self.session()?;
        let transaction = connection.transaction()?;
        {
            let mut statement = transaction.prepare(&JOKES_TABLE.insert_sql())?;
            for joke in jokes {
                statement.execute(params_from_iter(joke.values()))?;
            }
        }
        transaction.commit()?;
        Ok(jokes.len())
    }

    /// Returns up to `limit` jokes after skipping `skip`, ordered by id.
    /// Values beyond the BIGINT range are clamped to it.
    pub fn page(&self, skip: u64, limit: u64) -> Result<Vec<StoredJoke>, RustyEtlError> {
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let connection = self.session()?;
        let sql = format!("{} ORDER BY \"id\" LIMIT {limit} OFFSET {skip}", JOKES_TABLE.select_sql());
        let mut statement = connection.prepare(&sql)?;
        let jokes = statement
            .query_map([], read_joke)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jokes)
    }
}

fn read_joke(row: &Row<'_>) -> duckdb::Result<StoredJoke> {
    Ok(StoredJoke {
        id: row.get(0)?,
        joke: Joke {
            category: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            kind: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            joke: row.get(3)?,
            setup: row.get(4)?,
            delivery: row.get(5)?,
            nsfw: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
            political: row.get::<_, Option<bool>>(7)?.unwrap_or(false),
            sexist: row.get::<_, Option<bool>>(8)?.unwrap_or(false),
            safe: row.get::<_, Option<bool>>(9)?.unwrap_or(false),
            lang: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joke(index: usize) -> Joke {
        Joke {
            category: "Pun".to_owned(),
            kind: "twopart".to_owned(),
            setup: Some(format!("setup {index}")),
            delivery: Some(format!("delivery {index}")),
            lang: "en".to_owned(),
            ..Joke::default()
        }
    }

    fn store() -> JokeStore {
        JokeStore::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn pages_are_ordered_by_id() {
        let store = store();
        let jokes = (0..25).map(joke).collect::<Vec<_>>();
        assert_eq!(store.insert_all(&jokes).unwrap(), 25);

        let first = store.page(0, 10).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].joke, jokes[0]);
        assert!(first.windows(2).all(|pair| pair[0].id < pair[1].id));

        let last = store.page(20, 10).unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[4].joke.setup.as_deref(), Some("setup 24"));
        assert!(store.page(30, 10).unwrap().is_empty());
        assert!(store.page(0, 0).unwrap().is_empty());
    }

    #[test]
    fn huge_skip_and_limit_are_clamped() {
        let store = store();
        store.insert_all(&[joke(0), joke(1), joke(2)]).unwrap();
        assert_eq!(store.page(0, u64::MAX).unwrap().len(), 3);
        assert_eq!(store.page(1, u64::MAX).unwrap().len(), 2);
        assert!(store.page(u64::MAX, u64::MAX).unwrap().is_empty());
    }

    #[test]
    fn ids_keep_growing_across_fetches() {
        let store = store();
        store.insert_all(&[joke(0), joke(1)]).unwrap();
        store.insert_all(&[joke(2)]).unwrap();
        let ids = store.page(0, 10).unwrap().iter().map(|stored| stored.id).collect::<Vec<_>>();
        assert_eq!(ids.len(), 3);
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    }

    #[test]
    fn reopening_keeps_stored_jokes() {
        let directory = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(directory.path().join("jokes.db"));
        JokeStore::open(&config).unwrap().insert_all(&[joke(0)]).unwrap();

        let store = JokeStore::open(&config).unwrap();
        store.insert_all(&[joke(1)]).unwrap();
        let page = store.page(0, 10).unwrap();
        assert_eq!(page.len(), 2);
        assert_ne!(page[0].id, page[1].id);
    }

    #[test]
    fn incompatible_table_is_rejected() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch("CREATE TABLE jokes (id BIGINT, text VARCHAR)").unwrap();
        let error = JokeStore::from_connection(connection).err().unwrap();
        assert!(matches!(error, RustyEtlError::DatabaseError(DatabaseError::SchemaMismatch { .. })));
    }
}
