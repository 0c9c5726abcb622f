use clap::{Parser, Subcommand};

pub fn parse_year(value: &str) -> Result<i32, String> {
    let year = value
        .trim()
        .parse::<i32>()
        .map_err(|_| "year must be a four-digit number like 2023".to_string())?;
    if !(1900..=9999).contains(&year) {
        return Err("year must be between 1900 and 9999".to_string());
    }
    Ok(year)
}

pub fn parse_dimension(value: &str) -> Result<String, String> {
    match value {
        "month" | "product-category" | "product_category" | "category" => Ok(value.to_string()),
        _ => Err("dimension must be one of: month, product-category".to_string()),
    }
}

/// Extended help shown after `salesdash check --help`.
pub const CHECK_AFTER_HELP: &str = "\
Source format:
  CSV with one header row. Required columns (extra columns are ignored):
    date_of_sale       ISO date (2023-01-05) or locale date (01/05/2023, 01.05.2023)
    city               non-empty text
    sales_amount       decimal number; `$` and thousands separators are accepted
    product_category   text; leave empty when unknown (reported as `unspecified`)

  <source> is a local path, an http(s) URL, or `-` for stdin.

Row issues:
  Rows with an unparseable date, an empty city, a non-numeric amount, or more
  cells than the header are listed with their row number and left out of
  every report. Missing trailing cells count as empty.
";

#[derive(Debug, Parser)]
#[command(
    name = "salesdash",
    version,
    about = "sales dashboard reports, a canned chat helper, and contact form checks",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Revenue per configured city with change vs. previous year
    Dashboard {
        /// CSV path, http(s) URL, or `-` for stdin
        #[arg(long)]
        source: Option<String>,
        /// Current year (defaults to config)
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,
        /// Comparison year (defaults to config)
        #[arg(long, value_parser = parse_year)]
        previous_year: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sales for one city and year, split by month or product category
    Breakdown {
        /// City to report on
        #[arg(long)]
        city: String,
        /// Grouping dimension: month or product-category
        #[arg(long = "by", value_parser = parse_dimension)]
        by: Option<String>,
        /// Explicit year to report on
        #[arg(long, value_parser = parse_year, conflicts_with = "previous_year_view")]
        year: Option<i32>,
        /// Show the configured previous year instead of the current year
        #[arg(long)]
        previous_year_view: bool,
        /// CSV path, http(s) URL, or `-` for stdin
        #[arg(long)]
        source: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Revenue for every city and year in the source
    Revenue {
        /// CSV path, http(s) URL, or `-` for stdin
        #[arg(long)]
        source: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a sales source and list rows that need fixes
    #[command(after_help = CHECK_AFTER_HELP)]
    Check {
        /// CSV path, http(s) URL, or `-` for stdin
        source: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chat with the canned helper; reads prompts from stdin when no message is given
    Chat {
        /// Single message to answer
        message: Option<String>,
        /// Delay between streamed words in milliseconds (defaults to config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Validate a contact form submission
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Webhook that would receive the submission (defaults to config)
        #[arg(long)]
        webhook_url: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::{Commands, parse_from, parse_year};

    #[test]
    fn breakdown_parses_dimension_and_toggle() {
        let parsed = parse_from([
            "salesdash",
            "breakdown",
            "--city",
            "Osaka",
            "--by",
            "product-category",
            "--previous-year-view",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Breakdown {
                    ref city,
                    ref by,
                    previous_year_view: true,
                    ..
                } if city == "Osaka" && by.as_deref() == Some("product-category")
            ));
        }
    }

    #[test]
    fn breakdown_rejects_year_with_previous_year_view() {
        let parsed = parse_from([
            "salesdash",
            "breakdown",
            "--city",
            "Osaka",
            "--year",
            "2022",
            "--previous-year-view",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn breakdown_requires_city() {
        assert!(parse_from(["salesdash", "breakdown"]).is_err());
    }

    #[test]
    fn unknown_dimension_is_rejected_at_parse_time() {
        let parsed = parse_from(["salesdash", "breakdown", "--city", "Osaka", "--by", "weekday"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn verbose_flag_is_global() {
        let parsed = parse_from(["salesdash", "revenue", "--verbose"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.verbose);
        }
    }

    #[test]
    fn year_parser_rejects_non_years() {
        assert_eq!(parse_year("2023"), Ok(2023));
        assert!(parse_year("23a").is_err());
        assert!(parse_year("120").is_err());
    }
}
