use std::path::Path;

use clap::Parser;
use physics_lab_toolbox::app::{self, AppError, DopplerRunOptions};
use physics_lab_toolbox::cli::{Cli, Command};
use physics_lab_toolbox::config;
use physics_lab_toolbox::i18n::{self, keys, Translator};
use physics_lab_toolbox::thermo::{ReactionPreset, ThermoError};
use physics_lab_toolbox::ui_cli::Console;
use tracing::Level;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::INFO } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let lang = i18n::resolve_language(cli.lang.as_deref(), None);
    let mut tr = Translator::new_with_pack(&lang, Path::new(i18n::LOCALES_DIR));
    if let Err(err) = try_run(&cli, &mut tr) {
        let message = match &err {
            AppError::Thermo(ThermoError::UnknownCompound(name)) => {
                format!("{} {name}", tr.t(keys::ERROR_UNKNOWN_COMPOUND))
            }
            other => format!("{} {other}", tr.t(keys::ERROR_UNEXPECTED)),
        };
        eprintln!("{}: {message}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: &Cli, tr: &mut Translator) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if cli.lang.is_none() {
        let lang = i18n::resolve_language(None, Some(cfg.language.as_str()));
        *tr = Translator::new_with_pack(&lang, Path::new(i18n::LOCALES_DIR));
    }
    let mut console = Console::stdio();

    match &cli.cmd {
        None => app::run(&mut console, &mut cfg, &cli.config, tr),
        Some(Command::Doppler(args)) => {
            let run = args.apply(&cfg);
            run.validate()?;
            let report = app::run_doppler(
                &run,
                DopplerRunOptions {
                    plot: !args.no_plot,
                    animate: args.animate,
                },
            )?;
            console.print_doppler_report(tr, &report, run.doppler.wave_speed)
        }
        Some(Command::Enthalpy(args)) => {
            if args.list {
                for preset in ReactionPreset::ALL {
                    console.say(&format!("{}: {}", preset.key(), preset.reaction()))?;
                }
                return Ok(());
            }
            let preset = match &args.preset {
                Some(key) => ReactionPreset::from_key(key)?,
                None => cfg.thermo.preset,
            };
            let table = app::build_table(&cfg)?;
            let temperature_k = args.temperature.unwrap_or(cfg.thermo.temperature_k);
            let report = app::run_enthalpy(
                &cfg,
                &table,
                &preset.reaction(),
                preset.key(),
                temperature_k,
                !args.no_plot,
            )?;
            console.print_enthalpy_report(tr, &report)
        }
        Some(Command::Compounds) => {
            let table = app::build_table(&cfg)?;
            console.print_table(tr, &table)
        }
    }
}
