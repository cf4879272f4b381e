use anyhow::Result;
use bincode::{
    config::{BigEndian, WithOtherEndian},
    DefaultOptions, Options,
};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db as Sled, Tree};

/// Name of the tree every document of this service lives in.
const COLLECTION: &str = "todos";

pub struct Db {
    handle: Sled,
    collection: Tree,
    encoder: WithOtherEndian<DefaultOptions, BigEndian>,
}
impl Db {
    pub fn open(path: &str) -> Result<Self> {
        let handle = sled::open(path)?;
        let collection = handle.open_tree(COLLECTION)?;
        let encoder = bincode::options().with_big_endian();
        Ok(Self {
            handle,
            collection,
            encoder,
        })
    }

    // touches the on-disk files so a broken store fails at startup
    pub fn ping(&self) -> Result<()> {
        self.handle.size_on_disk()?;
        Ok(())
    }
    pub fn flush(&self) -> Result<()> {
        self.handle.flush()?;
        Ok(())
    }

    // CRUD
    pub fn next_id(&self) -> Result<u64> {
        let id = self.handle.generate_id()?;
        Ok(id)
    }
    pub fn insert<T: Serialize, K: AsRef<str>>(&self, key: K, value: &T) -> Result<()> {
        let key = key.as_ref();
        let value = self.encoder.serialize(value)?;
        self.collection.insert(key, value)?;
        Ok(())
    }
    /// Atomically rewrites the document stored under `key`.
    ///
    /// Returns `false` when there was nothing to update. A document that
    /// fails to decode is left untouched and the codec error is returned.
    pub fn update<T, K, F>(&self, key: K, mut apply: F) -> Result<bool>
    where
        T: Serialize + DeserializeOwned,
        K: AsRef<str>,
        F: FnMut(&mut T),
    {
        let key = key.as_ref();
        let encoder = self.encoder;
        let mut failure = None;
        // sled may rerun the closure when a concurrent write wins the race
        let previous = self.collection.fetch_and_update(key, |old| {
            failure = None;
            let old = old?;
            let rewritten = encoder.deserialize::<T>(old).and_then(|mut value| {
                apply(&mut value);
                encoder.serialize(&value)
            });
            match rewritten {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    failure = Some(err);
                    Some(old.to_vec())
                }
            }
        })?;
        if let Some(err) = failure {
            return Err(err.into());
        }
        Ok(previous.is_some())
    }
    /// Returns whether a document was actually removed.
    pub fn remove<K: AsRef<str>>(&self, key: K) -> Result<bool> {
        let key = key.as_ref();
        let removed = self.collection.remove(key)?;
        Ok(removed.is_some())
    }

    // Iterators
    pub fn iter_prefix<'a, T: DeserializeOwned + 'a>(
        &'a self,
        prefix: &str,
    ) -> Result<impl Iterator<Item = Result<(String, T)>> + 'a> {
        let iter = self.collection.scan_prefix(prefix).map(move |item| {
            let (key, value) = item?;
            let key = String::from_utf8(key.to_vec())?;
            let value = self.encoder.deserialize(&value)?;
            Ok((key, value))
        });
        Ok(iter)
    }
}

// Required Debug implementation for `Db`
impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("collection", &COLLECTION)
            .finish()
    }
}
