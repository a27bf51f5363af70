use crate::ClientResult;
use crate::commands::common::{SourceOptions, category_rows, load_for_command};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CategoriesData;
use crate::spending::aggregate::total_monthly;

pub fn run(file: Option<&str>, as_of: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(file, as_of))
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = load_for_command(options, "categories")?;
    let rows = category_rows(&context.active);
    log::info!("categories: {} groups", rows.len());

    let data = CategoriesData {
        total_monthly: total_monthly(&context.active),
        rows,
        source: context.loaded.source,
        warnings: context.loaded.warnings,
    };
    success("categories", data)
}
