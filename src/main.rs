//! Savings Calc CLI
//!
//! Command-line interface for running a single calculation

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use savings_calc::calculator::{evaluate, CalculationOutput, CalculationRequest, RateUnit, TimeUnit};
use savings_calc::export::write_rows_to_path;
use savings_calc::{parse_amount, CalculatorDefaults};

#[derive(Debug, Parser)]
#[command(name = "savings_calc", version, about = "Loan, deposit, chit fund and goal calculators")]
struct Cli {
    /// Print the full result record as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON file overriding calculator defaults
    #[arg(long, global = true)]
    defaults: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RateUnitArg {
    PerAnnum,
    PerMonth,
}

impl From<RateUnitArg> for RateUnit {
    fn from(arg: RateUnitArg) -> Self {
        match arg {
            RateUnitArg::PerAnnum => RateUnit::PerAnnum,
            RateUnitArg::PerMonth => RateUnit::PerMonth,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeUnitArg {
    Years,
    Months,
}

impl From<TimeUnitArg> for TimeUnit {
    fn from(arg: TimeUnitArg) -> Self {
        match arg {
            TimeUnitArg::Years => TimeUnit::Years,
            TimeUnitArg::Months => TimeUnit::Months,
        }
    }
}

/// Form-style numbers: "1,00,000", "₹5000" and "12.5%" are all accepted
fn raw_number(s: &str) -> Result<f64, String> {
    Ok(parse_amount(s))
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Loan EMI and amortization schedule
    Emi {
        #[arg(long, value_parser = raw_number)]
        principal: f64,
        #[arg(long, value_parser = raw_number)]
        rate: f64,
        #[arg(long, value_enum, default_value_t = RateUnitArg::PerAnnum)]
        rate_unit: RateUnitArg,
        #[arg(long, value_parser = raw_number)]
        months: f64,
        /// Write the schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Simple and compound interest
    Interest {
        #[arg(long, value_parser = raw_number)]
        principal: f64,
        #[arg(long, value_parser = raw_number)]
        rate: f64,
        #[arg(long, value_enum, default_value_t = RateUnitArg::PerAnnum)]
        rate_unit: RateUnitArg,
        #[arg(long, value_parser = raw_number)]
        time: f64,
        #[arg(long, value_enum, default_value_t = TimeUnitArg::Years)]
        time_unit: TimeUnitArg,
        /// Compounding periods per year
        #[arg(long)]
        frequency: Option<f64>,
    },
    /// Recurring deposit maturity
    Rd {
        #[arg(long, value_parser = raw_number)]
        monthly: f64,
        #[arg(long, value_parser = raw_number)]
        months: f64,
        #[arg(long, value_parser = raw_number)]
        rate: f64,
        #[arg(long)]
        compounding: Option<f64>,
    },
    /// Fixed deposit maturity
    Fd {
        #[arg(long, value_parser = raw_number)]
        principal: f64,
        #[arg(long, value_parser = raw_number)]
        months: f64,
        #[arg(long, value_parser = raw_number)]
        rate: f64,
        #[arg(long)]
        compounding: Option<f64>,
    },
    /// Daily deposit maturity
    Daily {
        #[arg(long, value_parser = raw_number)]
        amount: f64,
        #[arg(long, value_parser = raw_number)]
        days: f64,
        #[arg(long, value_parser = raw_number)]
        rate: f64,
    },
    /// Chit fund auction simulation
    Chit {
        #[arg(long, value_parser = raw_number)]
        total: f64,
        #[arg(long, value_parser = raw_number)]
        members: f64,
        #[arg(long, value_parser = raw_number)]
        commission: f64,
        #[arg(long, value_parser = raw_number)]
        months: f64,
        /// Write the auction table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Required monthly saving to reach a goal
    Goal {
        #[arg(long, value_parser = raw_number)]
        goal: f64,
        #[arg(long, value_parser = raw_number)]
        months: f64,
        #[arg(long, value_parser = raw_number, default_value = "0")]
        existing: f64,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        compounding: Option<f64>,
    },
}

impl Command {
    fn to_request(&self) -> CalculationRequest {
        match *self {
            Command::Emi { principal, rate, rate_unit, months, .. } => CalculationRequest::LoanEmi {
                principal,
                rate,
                rate_unit: rate_unit.into(),
                months,
            },
            Command::Interest { principal, rate, rate_unit, time, time_unit, frequency } => {
                CalculationRequest::Interest {
                    principal,
                    rate,
                    rate_unit: rate_unit.into(),
                    time,
                    time_unit: time_unit.into(),
                    frequency,
                }
            }
            Command::Rd { monthly, months, rate, compounding } => CalculationRequest::Rd {
                monthly_amount: monthly,
                months,
                rate,
                compounding_per_year: compounding,
            },
            Command::Fd { principal, months, rate, compounding } => CalculationRequest::Fd {
                principal,
                months,
                rate,
                compounding_per_year: compounding,
            },
            Command::Daily { amount, days, rate } => CalculationRequest::DailyDeposit {
                daily_amount: amount,
                days,
                rate,
            },
            Command::Chit { total, members, commission, months, .. } => CalculationRequest::ChitFund {
                total_amount: total,
                members,
                commission_percent: commission,
                months,
            },
            Command::Goal { goal, months, existing, rate, compounding } => CalculationRequest::GoalPlanner {
                goal_amount: goal,
                months,
                existing_savings: existing,
                rate,
                compounding_per_year: compounding,
            },
        }
    }

    fn csv_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Emi { csv, .. } | Command::Chit { csv, .. } => csv.as_ref(),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let defaults = match &cli.defaults {
        Some(path) => CalculatorDefaults::from_json_path(path)?,
        None => CalculatorDefaults::default(),
    };

    let request = cli.command.to_request();
    let output = evaluate(&request, &defaults)
        .with_context(|| format!("{} calculation failed", request.calculator_type()))?;

    if let Some(path) = cli.command.csv_path() {
        let written = match &output {
            CalculationOutput::LoanEmi(r) => write_rows_to_path(path, &r.schedule),
            CalculationOutput::ChitFund(r) => write_rows_to_path(path, &r.table),
            _ => Ok(()),
        };
        written.with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_output(&output);
    }

    if let Some(path) = cli.command.csv_path() {
        println!("\nTable written to: {}", path.display());
    }

    Ok(())
}

fn print_output(output: &CalculationOutput) {
    println!("{}", output.summary());

    match output {
        CalculationOutput::LoanEmi(r) => {
            println!("  EMI:            {:.2}", r.emi);
            println!("  Total Interest: {:.2}", r.total_interest);
            println!("  Total Payment:  {:.2}", r.total_payment);
            println!();
            println!("{:>6} {:>14} {:>14} {:>14} {:>16}", "Month", "Payment", "Interest", "Principal", "Balance");
            println!("{}", "-".repeat(68));
            for row in &r.schedule {
                println!(
                    "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
                    row.period, row.payment, row.interest_component, row.principal_component, row.remaining_balance
                );
            }
        }
        CalculationOutput::Interest(r) => {
            println!("  Simple:   amount {:.2}, interest {:.2}", r.simple.amount, r.simple.interest);
            println!("  Compound: amount {:.2}, interest {:.2}", r.compound.amount, r.compound.interest);
        }
        CalculationOutput::Rd(r) | CalculationOutput::Fd(r) | CalculationOutput::DailyDeposit(r) => {
            println!("  Total Deposit: {:.2}", r.total_deposit);
            println!("  Interest:      {:.2}", r.interest);
            println!("  Maturity:      {:.2}", r.maturity);
        }
        CalculationOutput::ChitFund(r) => {
            println!("  Monthly Contribution: {:.2}", r.monthly_contribution);
            println!();
            println!("{:>6} {:>7} {:>14} {:>14} {:>12}", "Month", "Winner", "Bid", "Dividend", "Foreman");
            println!("{}", "-".repeat(57));
            for row in &r.table {
                println!(
                    "{:>6} {:>7} {:>14.2} {:>14.2} {:>12.2}",
                    row.month, row.winner_slot, row.bid_amount, row.dividend_per_member, row.foreman_fee
                );
            }
        }
        CalculationOutput::GoalPlanner(r) => {
            println!("  Required Monthly Saving: {:.2}", r.required_monthly);
        }
    }
}
