use std::path::Path;
use std::sync::Arc;

use crate::ClientResult;
use crate::config::Config;
use crate::contracts::types::SourceSummary;
use crate::sales::{self, LoadedSales, SalesCache, SalesSource};

/// Source selection shared by every report command.
#[derive(Debug, Default, Clone)]
pub struct SourceOptions<'a> {
    pub source: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
    pub cache: Option<&'a SalesCache>,
}

pub(crate) struct LoadedContext {
    pub(crate) config: Config,
    pub(crate) source: SalesSource,
    pub(crate) sales: Arc<LoadedSales>,
}

pub(crate) fn load_context(options: &SourceOptions<'_>) -> ClientResult<LoadedContext> {
    let config = Config::load(options.home_override)?;
    let raw_source = options
        .source
        .clone()
        .unwrap_or_else(|| config.dashboard.source.clone());
    let source = SalesSource::parse(&raw_source);

    let load = || sales::load_with_stdin(&source, options.stdin_override.clone());
    let loaded = match (options.cache, &source) {
        // stdin is single-use
        (Some(cache), SalesSource::File(_) | SalesSource::Url(_)) => {
            cache.get_or_load(&source.id(), load)?
        }
        _ => Arc::new(load()?),
    };

    Ok(LoadedContext {
        config,
        source,
        sales: loaded,
    })
}

pub(crate) fn source_summary(source: &SalesSource, sales: &LoadedSales) -> SourceSummary {
    SourceSummary {
        source: source.id(),
        source_kind: source.kind().to_string(),
        rows_read: sales.rows_read,
        rows_valid: sales.records.len() as i64,
        rows_invalid: sales.rows_invalid(),
    }
}
