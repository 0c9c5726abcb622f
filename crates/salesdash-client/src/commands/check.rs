use std::collections::BTreeSet;

use crate::ClientResult;
use crate::commands::common::{SourceOptions, load_context, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CheckData;
use crate::sales::required_columns;

pub fn run(source: String) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions {
        source: Some(source),
        ..SourceOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_context(&options)?;
    let records = &context.sales.records;

    let data = CheckData {
        required_columns: required_columns()
            .into_iter()
            .map(std::string::ToString::to_string)
            .collect(),
        cities: records
            .iter()
            .map(|record| record.city.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect(),
        years: records
            .iter()
            .map(|record| record.year)
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect(),
        summary: source_summary(&context.source, &context.sales),
        row_issues: context.sales.row_errors.clone(),
    };

    success("check", data)
}
