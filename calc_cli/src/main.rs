//! # Bedside Calc CLI Application
//!
//! Terminal front end for the clinical calculators in `calc_core`.
//!
//! Numeric arguments are passed through as raw text so the engine decides
//! what is valid. Results are printed to 2 decimal places, or as JSON with
//! `--json`. The process exits with status 1 when no result was produced.
//!
//! ```text
//! calc_cli drip-rate --volume 1000 --time 8 --drop-factor 15
//! calc_cli bsa --height 70 --height-unit in --weight 154 --weight-unit lbs --json
//! calc_cli equations bsa
//! calc_cli            # interactive mode
//! ```

mod display;
mod interactive;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calc_core::calculations::{
    body_weight, bsa, dosing, drip_rate, BodyWeightInput, BsaInput, CalculationResult, CalculatorKind, DosingInput,
    DripRateInput, Sex,
};
use calc_core::errors::CalcResult;
use calc_core::units::{LengthUnit, MassUnit, TimeUnit};

#[derive(Parser)]
#[command(name = "calc_cli", version)]
#[command(about = "Clinical calculators: drip rate, dosing, BSA, ideal/adjusted body weight", long_about = None)]
struct Cli {
    /// Print the result (or the rejection) as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log calculation details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Infusion rate (mL/hr) and drip rate (gtt/min)
    DripRate {
        /// Total volume (mL)
        #[arg(long, allow_hyphen_values = true)]
        volume: String,

        /// Infusion time
        #[arg(long, allow_hyphen_values = true)]
        time: String,

        #[arg(long, default_value = "hr")]
        time_unit: TimeUnit,

        /// Administration set drop factor (gtt/mL)
        #[arg(long, allow_hyphen_values = true)]
        drop_factor: String,
    },

    /// Total dose (mg) from weight and mg/kg
    Dosing {
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        #[arg(long, default_value = "kg")]
        weight_unit: MassUnit,

        /// Dose per kilogram (mg/kg)
        #[arg(long, allow_hyphen_values = true)]
        dose: String,
    },

    /// Body surface area (Mosteller)
    Bsa {
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        #[arg(long, default_value = "cm")]
        height_unit: LengthUnit,

        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        #[arg(long, default_value = "kg")]
        weight_unit: MassUnit,
    },

    /// Ideal (Devine) and adjusted body weight
    BodyWeight {
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        #[arg(long, default_value = "cm")]
        height_unit: LengthUnit,

        /// Actual body weight
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        #[arg(long, default_value = "kg")]
        weight_unit: MassUnit,

        #[arg(long, default_value = "male")]
        sex: Sex,
    },

    /// Print the equation reference (markdown), or the equations one calculator uses
    Equations {
        /// Calculator to list (e.g., "bsa", "drip-rate")
        kind: Option<CalculatorKind>,
    },

    /// Prompt for each field (default when no command is given)
    Interactive,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "calc_core=debug,calc_cli=debug" } else { "calc_core=warn,calc_cli=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stderr keeps stdout clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_calculator(command: Commands) -> Option<(CalculatorKind, CalcResult<CalculationResult>)> {
    let outcome = match command {
        Commands::DripRate {
            volume,
            time,
            time_unit,
            drop_factor,
        } => {
            let input = DripRateInput::new(volume, time, time_unit, drop_factor);
            (CalculatorKind::DripRate, drip_rate::evaluate(&input).map(CalculationResult::DripRate))
        }
        Commands::Dosing {
            weight,
            weight_unit,
            dose,
        } => {
            let input = DosingInput::new(weight, weight_unit, dose);
            (CalculatorKind::Dosing, dosing::evaluate(&input).map(CalculationResult::Dosing))
        }
        Commands::Bsa {
            height,
            height_unit,
            weight,
            weight_unit,
        } => {
            let input = BsaInput::new(height, height_unit, weight, weight_unit);
            (CalculatorKind::Bsa, bsa::evaluate(&input).map(CalculationResult::Bsa))
        }
        Commands::BodyWeight {
            height,
            height_unit,
            weight,
            weight_unit,
            sex,
        } => {
            let input = BodyWeightInput::new(height, height_unit, weight, weight_unit, sex);
            (CalculatorKind::BodyWeight, body_weight::evaluate(&input).map(CalculationResult::BodyWeight))
        }
        Commands::Equations { .. } | Commands::Interactive => return None,
    };
    Some(outcome)
}

/// Process exit status: 0 when a result was produced, 1 when input was rejected.
fn exit_status(outcome: &CalcResult<CalculationResult>) -> u8 {
    if outcome.is_ok() {
        0
    } else {
        1
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = match cli.command {
        None | Some(Commands::Interactive) => {
            interactive::run(cli.json);
            return ExitCode::SUCCESS;
        }
        Some(Commands::Equations { kind: None }) => {
            print!("{}", calc_core::equations::generate_equations_markdown());
            return ExitCode::SUCCESS;
        }
        Some(Commands::Equations { kind: Some(kind) }) => {
            print!("{}", display::equation_list(kind));
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
    };

    let Some((kind, outcome)) = run_calculator(command) else {
        return ExitCode::SUCCESS;
    };
    tracing::debug!(calculator = kind.slug(), ok = outcome.is_ok(), "command finished");

    if cli.json {
        display::print_json(&outcome);
    } else {
        match &outcome {
            Ok(result) => display::print_result(kind, result),
            Err(err) => display::print_no_result(err),
        }
    }

    ExitCode::from(exit_status(&outcome))
}
