//! Load diagnosis requests from CSV
//!
//! Columns: `id,income,fixed_expenses,variable_expenses,principal,term_months,annual_rate_percent`.
//! Loan columns may be left empty for a profile-only row.

use csv::Reader;
use std::error::Error;
use std::path::Path;

use super::DiagnosisRequest;
use crate::loan::LoanRequest;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: Option<String>,
    income: f64,
    fixed_expenses: f64,
    variable_expenses: f64,
    principal: Option<f64>,
    term_months: Option<i32>,
    annual_rate_percent: Option<f64>,
}

impl CsvRow {
    fn into_request(self) -> Result<DiagnosisRequest, Box<dyn Error>> {
        let loan = match (self.principal, self.term_months, self.annual_rate_percent) {
            (None, None, None) => None,
            (Some(principal), Some(term_months), rate) => {
                Some(LoanRequest::new(principal, term_months, rate.unwrap_or(0.0)))
            }
            _ => {
                return Err(format!(
                    "row {}: principal and term_months must be given together",
                    self.id.as_deref().unwrap_or("?")
                )
                .into())
            }
        };

        Ok(DiagnosisRequest {
            id: self.id.filter(|s| !s.is_empty()),
            monthly_income: self.income,
            fixed_expenses: self.fixed_expenses,
            variable_expenses: self.variable_expenses,
            loan,
        })
    }
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<DiagnosisRequest>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_requests_from_reader(file)
}

/// Load requests from any reader (e.g., string buffer, stdin)
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<DiagnosisRequest>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.into_request()?);
    }

    Ok(requests)
}
