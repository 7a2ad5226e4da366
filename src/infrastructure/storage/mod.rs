pub(crate) mod encoding;
pub(crate) mod sqlite_store;
