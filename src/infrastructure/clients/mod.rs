pub(crate) mod fetcher;
