use std::fs;
use std::path::{Path, PathBuf};

use salesdash_client::SuccessEnvelope;
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub const SALES_HEADER: &str = "date_of_sale,city,product_category,sales_amount";

pub const TOKYO_SCENARIO: &str = "date_of_sale,city,product_category,sales_amount
2022-01-05,Tokyo,A,100
2023-01-05,Tokyo,A,150
2023-02-10,Tokyo,,50
";

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("salesdash-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_config(home: &Path, body: &str) {
    let result = fs::write(home.join("config.toml"), body);
    assert!(result.is_ok());
}

pub fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let result = fs::write(&path, body);
    assert!(result.is_ok());
    path
}

pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut body = String::from(SALES_HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    body
}

pub fn payload(result: salesdash_client::ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn approx_eq(left: &Value, right: f64) -> bool {
    left.as_f64()
        .map(|value| (value - right).abs() < 1e-9)
        .unwrap_or(false)
}
