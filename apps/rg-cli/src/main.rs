use clap::{Parser, Subcommand, ValueEnum};
use rg_config::{LogLevel, RunFile};
use rg_eos::binodal::cache as binodal_cache;
use rg_eos::{
    Composition, EquationOfState, GasInput, GasKind, MixtureComponent, ModelIdentity, ModelInput, Quantity,
    StateLog, SweepDefinition, SweepResult, SweepType, catalog, create_model, execute_many, execute_sweep,
    filter_catalog, gas_catalog, parse_quantity,
};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "rg-cli")]
#[command(about = "Real-gas equations of state: states, envelopes and sweeps", long_about = None)]
struct Cli {
    /// error, warn, info, debug or trace; a run file's own level otherwise
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

/// Gas on the command line: one catalog gas or a `name=fraction,...` list.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct GasArgs {
    /// Catalog gas, e.g. methane or CO2
    #[arg(long)]
    gas: Option<GasKind>,
    /// Mixture as name=fraction pairs, e.g. methane=0.9,ethane=0.1
    #[arg(long, value_parser = parse_mix)]
    mix: Option<Mix>,
}

#[derive(Clone, Debug)]
struct Mix(Vec<(GasKind, f64)>);

#[derive(Subcommand)]
enum Commands {
    /// List catalog gases
    Gases {
        /// Only gases whose name or formula contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Evaluate one state and print its log
    State {
        #[arg(long)]
        model: ModelIdentity,
        #[command(flatten)]
        gas: GasArgs,
        /// Pressure, e.g. "5 MPa" or 101325
        #[arg(long)]
        p: String,
        /// Temperature, e.g. "25 C" or 300
        #[arg(long)]
        t: String,
        #[arg(long, value_enum, default_value = "yaml")]
        format: Format,
    },
    /// Print the binodal envelope of a pure gas
    Binodal {
        #[arg(long)]
        model: ModelIdentity,
        #[arg(long)]
        gas: GasKind,
        /// Print the reduced envelope instead of absolute units
        #[arg(long)]
        reduced: bool,
    },
    /// Run an isotherm (pressure sweep) or isobar (temperature sweep)
    Sweep {
        #[arg(long)]
        model: ModelIdentity,
        #[command(flatten)]
        gas: GasArgs,
        /// pressure or temperature
        #[arg(long, value_parser = parse_swept)]
        quantity: Quantity,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 11)]
        points: usize,
        #[arg(long)]
        logarithmic: bool,
        /// The other state variable, held fixed
        #[arg(long)]
        fixed: String,
    },
    /// Validate a run file
    Validate {
        /// Path to the run file (YAML or JSON)
        run_path: PathBuf,
    },
    /// Evaluate every point and sweep of a run file
    Run {
        /// Path to the run file (YAML or JSON)
        run_path: PathBuf,
        #[arg(long, value_enum, default_value = "yaml")]
        format: Format,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gases { filter } => {
            init_logging(cli.log_level.unwrap_or_default());
            cmd_gases(filter.as_deref())
        }
        Commands::State {
            model,
            gas,
            p,
            t,
            format,
        } => {
            init_logging(cli.log_level.unwrap_or_default());
            cmd_state(model, &gas, &p, &t, format)
        }
        Commands::Binodal { model, gas, reduced } => {
            init_logging(cli.log_level.unwrap_or_default());
            cmd_binodal(model, gas, reduced)
        }
        Commands::Sweep {
            model,
            gas,
            quantity,
            start,
            end,
            points,
            logarithmic,
            fixed,
        } => {
            init_logging(cli.log_level.unwrap_or_default());
            let spacing = if logarithmic {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let sweep = SweepDefinition::from_text(start, end, quantity, points, spacing)?;
            cmd_sweep(model, &gas, &sweep, &fixed)
        }
        Commands::Validate { run_path } => {
            init_logging(cli.log_level.unwrap_or_default());
            cmd_validate(&run_path)
        }
        Commands::Run { run_path, format } => {
            let run = rg_config::load(&run_path)?;
            init_logging(cli.log_level.unwrap_or(run.configuration.log_level));
            cmd_run(&run, format)
        }
    }
}

fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(level.as_tracing())
        .with_writer(std::io::stderr)
        .init();
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(LogLevel::Error),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        _ => Err(format!("unknown log level '{s}'")),
    }
}

fn parse_swept(s: &str) -> Result<Quantity, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "p" | "pressure" => Ok(Quantity::Pressure),
        "t" | "temperature" => Ok(Quantity::Temperature),
        _ => Err(format!("'{s}' is not pressure or temperature")),
    }
}

fn parse_mix(s: &str) -> Result<Mix, String> {
    s.split(',')
        .map(|pair| {
            let (name, fraction) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected name=fraction, got '{pair}'"))?;
            let gas = name.parse::<GasKind>().map_err(|e| format!("{e}: '{name}'"))?;
            let fraction = fraction
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("bad fraction '{fraction}'"))?;
            Ok((gas, fraction))
        })
        .collect::<Result<Vec<_>, String>>()
        .map(Mix)
}

/// Factory gas input matching the model family.
fn gas_input(model: ModelIdentity, args: &GasArgs) -> CliResult<GasInput> {
    let items: Vec<(GasKind, f64)> = match (&args.gas, &args.mix) {
        (Some(gas), _) => vec![(*gas, 1.0)],
        (None, Some(mix)) => mix.0.clone(),
        (None, None) => return Err("give --gas or --mix".into()),
    };
    if model.is_gost() {
        return Ok(GasInput::GostMixture(Composition::new_mole_fractions(items)?));
    }
    match items.as_slice() {
        [(gas, _)] => {
            let entry = catalog::lookup(*gas).ok_or_else(|| format!("{gas} is not in the catalog"))?;
            Ok(GasInput::Pure(entry.const_parameters()?))
        }
        _ => Ok(GasInput::Mixture(
            items
                .into_iter()
                .map(|(gas, fraction)| MixtureComponent::catalog(gas, fraction))
                .collect(),
        )),
    }
}

fn print_document<T: Serialize>(value: &T, format: Format) -> CliResult<()> {
    let text = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn cmd_gases(filter: Option<&str>) -> CliResult<()> {
    let entries = match filter {
        Some(query) => filter_catalog(query),
        None => gas_catalog().to_vec(),
    };
    if entries.is_empty() {
        println!("No gases match");
        return Ok(());
    }
    println!(
        "{:<18} {:<20} {:>10} {:>9} {:>9} {:>7}",
        "key", "name", "M kg/kmol", "Tc K", "Pc MPa", "ω"
    );
    for entry in entries {
        println!(
            "{:<18} {:<20} {:>10.3} {:>9.2} {:>9.3} {:>7.3}",
            entry.gas.key(),
            entry.display_name,
            entry.molar_mass,
            entry.tc,
            entry.pc_mpa,
            entry.acentric
        );
    }
    Ok(())
}

fn cmd_state(model: ModelIdentity, gas: &GasArgs, p: &str, t: &str, format: Format) -> CliResult<()> {
    let p = parse_quantity(p, Quantity::Pressure)?;
    let t = parse_quantity(t, Quantity::Temperature)?;
    let model = create_model(&ModelInput::new(model, gas_input(model, gas)?, p, t))?;
    print_document(&model.state_log(), format)
}

fn cmd_binodal(model: ModelIdentity, gas: GasKind, reduced: bool) -> CliResult<()> {
    let entry = catalog::lookup(gas).ok_or_else(|| format!("{gas} is not in the catalog"))?;
    let constants = entry.const_parameters()?;
    let points = if reduced {
        binodal_cache::get_or_compute(model, gas, constants.acentric()).map(|points| (*points).clone())
    } else {
        binodal_cache::scaled(
            model,
            gas,
            constants.acentric(),
            constants.vc(),
            constants.pc(),
            constants.tc(),
        )
    };
    let points = points.ok_or_else(|| format!("{model} has no binodal envelope"))?;

    println!("{:>12} {:>14} {:>14} {:>14}", "t", "p", "v_liquid", "v_vapour");
    for (t, p, v_left, v_right) in points.rows() {
        println!("{t:>12.4} {p:>14.6e} {v_left:>14.6e} {v_right:>14.6e}");
    }
    Ok(())
}

fn print_sweep(result: &SweepResult) {
    println!(
        "{} {} at {} = {} ({} ok, {} failed)",
        result.identity,
        result.quantity,
        match result.quantity {
            Quantity::Temperature => "p",
            _ => "t",
        },
        result.fixed_value,
        result.num_successful,
        result.num_failed
    );
    for (x, state) in result.independent_values.iter().zip(&result.states) {
        match state {
            Some(state) => println!("{x:>14.6e} {:>14.6e} {:>8}", state.v, state.phase),
            None => println!("{x:>14.6e} {:>14} {:>8}", "-", "failed"),
        }
    }
}

fn cmd_sweep(model: ModelIdentity, gas: &GasArgs, sweep: &SweepDefinition, fixed: &str) -> CliResult<()> {
    let fixed = match sweep.quantity {
        Quantity::Temperature => parse_quantity(fixed, Quantity::Pressure)?,
        _ => parse_quantity(fixed, Quantity::Temperature)?,
    };
    let (p, t) = match sweep.quantity {
        Quantity::Temperature => (fixed, sweep.start_si),
        _ => (sweep.start_si, fixed),
    };
    let template = ModelInput::new(model, gas_input(model, gas)?, p, t);
    let result = execute_sweep(&template, sweep, fixed)?;
    print_sweep(&result);
    Ok(())
}

fn cmd_validate(run_path: &Path) -> CliResult<()> {
    println!("Validating run file: {}", run_path.display());
    let run = rg_config::load(run_path)?;
    println!("✓ Run file is valid: {} ({} models)", run.name, run.models.len());
    Ok(())
}

#[derive(Serialize)]
struct PointOutput {
    p: f64,
    t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<StateLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct SweepOutput {
    model: ModelIdentity,
    sweep: String,
    fixed: f64,
    values: Vec<f64>,
    states: Vec<Option<StateLog>>,
}

#[derive(Serialize)]
struct RunOutput {
    name: String,
    models: Vec<ModelIdentity>,
    points: Vec<PointOutput>,
    sweeps: Vec<SweepOutput>,
}

fn cmd_run(run: &RunFile, format: Format) -> CliResult<()> {
    let mut setup = run.calculation_setup()?;
    if setup.is_empty() {
        return Err("no listed model accepts the gas".into());
    }

    let points = run
        .state_points()?
        .into_iter()
        .map(|(p, t)| match setup.select(p, t) {
            Ok(state) => PointOutput {
                p,
                t,
                state: Some(state),
                error: None,
            },
            Err(err) => PointOutput {
                p,
                t,
                state: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let templates: Vec<ModelInput> = run.model_inputs()?.into_iter().map(|(input, _)| input).collect();
    let mut sweeps = Vec::new();
    for (sweep, fixed) in run.sweep_definitions()? {
        for result in execute_many(&templates, &sweep, fixed) {
            let result = result?;
            sweeps.push(SweepOutput {
                model: result.identity,
                sweep: sweep.to_string(),
                fixed: result.fixed_value,
                values: result.independent_values,
                states: result.states,
            });
        }
    }

    print_document(
        &RunOutput {
            name: run.name.clone(),
            models: setup.identities(),
            points,
            sweeps,
        },
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mix_pairs_parse() {
        let mix = parse_mix("methane=0.9, CO2=0.1").unwrap();
        assert_eq!(mix.0, vec![(GasKind::Methane, 0.9), (GasKind::CarbonDioxide, 0.1)]);
        assert!(parse_mix("methane").is_err());
        assert!(parse_mix("unobtainium=1").is_err());
    }

    #[test]
    fn gost_models_get_a_composition() {
        let args = GasArgs {
            gas: None,
            mix: Some(Mix(vec![(GasKind::Methane, 0.96), (GasKind::Nitrogen, 0.04)])),
        };
        assert!(matches!(
            gas_input(ModelIdentity::NG_GOST, &args).unwrap(),
            GasInput::GostMixture(_)
        ));
        assert!(matches!(
            gas_input(ModelIdentity::PENG_ROBINSON, &args).unwrap(),
            GasInput::Mixture(_)
        ));
    }

    #[test]
    fn state_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "rg-cli", "--log-level", "debug", "state", "--model", "pr", "--gas", "methane", "--p", "5 MPa", "--t",
            "300",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Commands::State { .. }));
        assert!(Cli::try_parse_from(["rg-cli", "state", "--model", "pr", "--p", "1", "--t", "300"]).is_err());
    }
}
