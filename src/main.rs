//! Cash-flow diagnostic CLI
//!
//! Diagnoses a monthly budget and an optional loan. Every numeric flag can also be
//! given through an environment variable (`DIAG_INCOME`, `DIAG_PRINCIPAL`, ...).

use anyhow::{anyhow, Context, Result};
use cashflow_diagnostic::{
    config::{DEFAULT_MAX_CHECKPOINT_YEAR, DEFAULT_MAX_TERM_MONTHS, DEFAULT_YEAR_CHECKPOINTS},
    scenario::{load_requests, rate_range},
    CashFlowAnalyzer, Diagnosis, DiagnosisRequest, DiagnosisRunner, EngineConfig, LifestyleVerdict,
    LoanRequest, ProjectionKind, ProjectionResult,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cashflow_diagnostic", version, about = "Monthly budget and loan affordability diagnosis")]
struct Cli {
    /// Longest accepted loan term in months
    #[arg(long, env = "DIAG_MAX_TERM_MONTHS", default_value_t = DEFAULT_MAX_TERM_MONTHS, global = true)]
    max_term_months: i32,

    /// Year checkpoints for the projection
    #[arg(long, env = "DIAG_YEARS", value_delimiter = ',', global = true)]
    years: Vec<u32>,

    /// Latest accepted year checkpoint
    #[arg(long, env = "DIAG_MAX_CHECKPOINT_YEAR", default_value_t = DEFAULT_MAX_CHECKPOINT_YEAR, global = true)]
    max_checkpoint_year: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Diagnose one budget and optional loan
    Diagnose {
        #[command(flatten)]
        budget: BudgetArgs,

        #[command(flatten)]
        loan: LoanArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Write the month-by-month balance series to this CSV file
        #[arg(long)]
        series_csv: Option<PathBuf>,
    },
    /// Diagnose every row of a scenario CSV and write a verdict CSV
    Batch {
        /// Scenario file (id,income,fixed_expenses,variable_expenses,principal,term_months,annual_rate_percent)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "diagnosis_output.csv")]
        output: PathBuf,
    },
    /// Evaluate one loan across a range of annual rates
    Sweep {
        #[command(flatten)]
        budget: BudgetArgs,

        #[command(flatten)]
        loan: LoanArgs,

        /// Lowest annual rate (%)
        #[arg(long, default_value_t = 0.0)]
        from: f64,

        /// Highest annual rate (%)
        #[arg(long, default_value_t = 100.0)]
        to: f64,

        /// Rate increment (%)
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
}

#[derive(Args, Debug)]
struct BudgetArgs {
    /// Net monthly income
    #[arg(long, env = "DIAG_INCOME")]
    income: f64,

    /// Fixed monthly expenses (rent, utilities, tuition, ...)
    #[arg(long, env = "DIAG_FIXED_EXPENSES", default_value_t = 0.0)]
    fixed: f64,

    /// Variable monthly expenses (food, transport, entertainment, ...)
    #[arg(long, env = "DIAG_VARIABLE_EXPENSES", default_value_t = 0.0)]
    variable: f64,
}

#[derive(Args, Debug)]
struct LoanArgs {
    /// Loan amount
    #[arg(long, env = "DIAG_PRINCIPAL", requires = "term_months")]
    principal: Option<f64>,

    /// Term in months
    #[arg(long, env = "DIAG_TERM_MONTHS", allow_negative_numbers = true)]
    term_months: Option<i32>,

    /// Annual interest rate (%)
    #[arg(long, env = "DIAG_ANNUAL_RATE", default_value_t = 25.0)]
    rate: f64,
}

impl LoanArgs {
    fn to_request(&self) -> Result<Option<LoanRequest>> {
        match (self.principal, self.term_months) {
            (Some(principal), Some(term_months)) => Ok(Some(LoanRequest::new(principal, term_months, self.rate))),
            (Some(_), None) => Err(anyhow!("--principal needs --term-months")),
            (None, _) => Ok(None),
        }
    }
}

#[derive(Serialize)]
struct BatchRow {
    id: String,
    free_cash_flow: Option<f64>,
    within_means: Option<bool>,
    monthly_payment: Option<f64>,
    post_loan_cash_flow: Option<f64>,
    is_viable: Option<bool>,
    shortfall: Option<f64>,
    final_balance: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig {
        max_term_months: cli.max_term_months,
        year_checkpoints: if cli.years.is_empty() {
            DEFAULT_YEAR_CHECKPOINTS.to_vec()
        } else {
            cli.years.clone()
        },
        max_checkpoint_year: cli.max_checkpoint_year,
    };
    let runner = DiagnosisRunner::new(config);

    match cli.command {
        Command::Diagnose { budget, loan, json, series_csv } => {
            let mut request = DiagnosisRequest::new(budget.income, budget.fixed, budget.variable);
            request.loan = loan.to_request()?;

            let diagnosis = runner.run(&request).context("diagnosis failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&diagnosis)?);
            } else {
                print_diagnosis(&diagnosis);
            }

            if let Some(path) = series_csv {
                let projection = diagnosis
                    .loan
                    .as_ref()
                    .map(|l| &l.projection)
                    .ok_or_else(|| anyhow!("--series-csv needs a loan (--principal)"))?;
                write_series(&path, projection)?;
                info!("series written to {}", path.display());
            }
        }
        Command::Batch { input, output } => {
            let requests = load_requests(&input)
                .map_err(|e| anyhow!("failed to load {}: {}", input.display(), e))?;
            info!("loaded {} scenarios from {}", requests.len(), input.display());

            let results = runner.run_batch(&requests);
            let mut writer = csv::Writer::from_path(&output)
                .with_context(|| format!("unable to create {}", output.display()))?;

            for (i, (request, result)) in requests.iter().zip(results).enumerate() {
                let id = request.id.clone().unwrap_or_else(|| (i + 1).to_string());
                writer.serialize(batch_row(id, result))?;
            }
            writer.flush()?;
            println!("Output written to {}", output.display());
        }
        Command::Sweep { budget, loan, from, to, step } => {
            let profile = CashFlowAnalyzer::analyze(budget.income, budget.fixed, budget.variable)?;
            let request = loan
                .to_request()?
                .ok_or_else(|| anyhow!("sweep needs a loan (--principal)"))?;

            let points = runner.sweep_rates(&profile, &request, &rate_range(from, to, step))?;

            println!("{:>8} {:>14} {:>14} {:>7}", "Rate%", "Payment", "PostLoan", "Viable");
            println!("{}", "-".repeat(46));
            for p in &points {
                println!(
                    "{:>8.2} {:>14.2} {:>14.2} {:>7}",
                    p.annual_rate_percent,
                    p.monthly_payment,
                    p.post_loan_cash_flow,
                    if p.is_viable { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}

fn batch_row(id: String, result: cashflow_diagnostic::Result<Diagnosis>) -> BatchRow {
    match result {
        Ok(d) => {
            let verdict = d.loan.as_ref().map(|l| l.verdict);
            BatchRow {
                id,
                free_cash_flow: Some(d.free_cash_flow),
                within_means: Some(d.lifestyle.is_within_means()),
                monthly_payment: verdict.map(|v| v.monthly_payment),
                post_loan_cash_flow: verdict.map(|v| v.post_loan_cash_flow),
                is_viable: verdict.map(|v| v.is_viable),
                shortfall: verdict.map(|v| v.shortfall),
                final_balance: d.loan.as_ref().map(|l| l.projection.summary().final_balance),
                error: None,
            }
        }
        Err(e) => BatchRow {
            id,
            free_cash_flow: None,
            within_means: None,
            monthly_payment: None,
            post_loan_cash_flow: None,
            is_viable: None,
            shortfall: None,
            final_balance: None,
            error: Some(e.to_string()),
        },
    }
}

fn print_diagnosis(d: &Diagnosis) {
    println!("Monthly Summary");
    println!("  Income:          {:>14.2}", d.profile.monthly_income);
    println!("  Total Expenses:  {:>14.2}", d.total_expenses);
    println!("  Free Cash Flow:  {:>14.2}", d.free_cash_flow);
    match d.lifestyle {
        LifestyleVerdict::WithinMeans { surplus } => {
            println!("  Living within means ({:.2} left each month)", surplus)
        }
        LifestyleVerdict::StructuralDeficit { deficit } => {
            println!("  Structural deficit of {:.2} per month", deficit)
        }
    }

    let Some(loan) = &d.loan else {
        return;
    };
    let v = &loan.verdict;

    println!("\nLoan Analysis");
    println!("  Monthly Payment:      {:>14.2}", v.monthly_payment);
    println!("  Post-loan Cash Flow:  {:>14.2} ({:+.2})", v.post_loan_cash_flow, v.cash_flow_delta());
    println!("  Total Interest:       {:>14.2}", v.total_interest);
    if let Some(warning) = &v.warning {
        println!("  WARNING: {}", warning);
    }
    if v.is_viable {
        println!("  Affordable: {:.2} left each month after the payment", v.post_loan_cash_flow);
    } else {
        println!("  NOT affordable: payment exceeds free cash flow by {:.2} per month", v.shortfall);
    }

    let heading = match loan.projection.kind {
        ProjectionKind::Debt => "Accumulated Debt",
        ProjectionKind::Surplus => "Accumulated Savings",
    };
    println!("\n{}", heading);
    for point in &loan.projection.checkpoints {
        println!("  {:>10}: {:>16.2}", point.period_label, point.cumulative_balance);
    }
}

fn write_series(path: &Path, projection: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for point in &projection.series {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}
