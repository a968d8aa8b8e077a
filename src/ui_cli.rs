use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{self, AppError, DopplerReport, DopplerRunOptions, EnthalpyReport};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::thermo::{
    FormationEnthalpyTable, HeatFlow, Reaction, ReactionBuilder, ReactionPreset, ThermoError,
};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Doppler,
    Enthalpy,
    Compounds,
    Settings,
    Exit,
}

/// 프롬프트 입출력. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    fn read_parsed<T: std::str::FromStr>(&mut self, tr: &Translator, prompt: &str) -> Result<T, AppError> {
        loop {
            let s = self.read_line(prompt)?;
            match s.parse::<T>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    /// 기본값을 보여 주고 빈 입력이면 기본값을 쓴다. 숫자가 아니면 다시 묻는다.
    fn read_or_default<T>(&mut self, tr: &Translator, prompt: &str, default: T) -> Result<T, AppError>
    where
        T: std::str::FromStr + std::fmt::Display + Copy,
    {
        let full = format!("{prompt} ({}: {default}): ", tr.t(keys::DEFAULT_LABEL));
        loop {
            let s = self.read_line(&full)?;
            if s.is_empty() {
                return Ok(default);
            }
            match s.parse::<T>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    fn read_yes(&mut self, prompt: &str) -> Result<bool, AppError> {
        let s = self.read_line(prompt)?.to_lowercase();
        Ok(matches!(s.as_str(), "y" | "yes" | "s" | "si" | "sí"))
    }

    /// 메인 메뉴를 표시하고 선택값을 반환한다.
    pub fn main_menu(&mut self, tr: &Translator) -> Result<MenuChoice, AppError> {
        for key in [
            keys::MAIN_MENU_TITLE,
            keys::MAIN_MENU_DOPPLER,
            keys::MAIN_MENU_ENTHALPY,
            keys::MAIN_MENU_COMPOUNDS,
            keys::MAIN_MENU_SETTINGS,
            keys::MAIN_MENU_EXIT,
        ] {
            self.say(tr.t(key))?;
        }
        loop {
            let sel = self.read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
            match sel.as_str() {
                "1" => return Ok(MenuChoice::Doppler),
                "2" => return Ok(MenuChoice::Enthalpy),
                "3" => return Ok(MenuChoice::Compounds),
                "4" => return Ok(MenuChoice::Settings),
                "0" => return Ok(MenuChoice::Exit),
                _ => self.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
            }
        }
    }

    /// 도플러 파라미터를 묻는다. 입력값은 이번 실행에만 쓰고 설정 파일에는 쓰지 않는다.
    pub fn prompt_doppler(&mut self, tr: &Translator, config: &Config) -> Result<Config, AppError> {
        let mut run = config.clone();
        let d = &mut run.doppler;
        d.wave_speed = self.read_or_default(tr, tr.t(keys::PROMPT_WAVE_SPEED), d.wave_speed)?;
        d.base_frequency =
            self.read_or_default(tr, tr.t(keys::PROMPT_BASE_FREQUENCY), d.base_frequency)?;
        d.observer_speed =
            self.read_or_default(tr, tr.t(keys::PROMPT_OBSERVER_SPEED), d.observer_speed)?;
        d.source_speed_min =
            self.read_or_default(tr, tr.t(keys::PROMPT_SOURCE_MIN), d.source_speed_min)?;
        d.source_speed_max =
            self.read_or_default(tr, tr.t(keys::PROMPT_SOURCE_MAX), d.source_speed_max)?;
        d.steps = self.read_or_default(tr, tr.t(keys::PROMPT_STEPS), d.steps)?;
        Ok(run)
    }

    /// 도플러 메뉴를 처리한다.
    pub fn handle_doppler(&mut self, tr: &Translator, config: &Config) -> Result<(), AppError> {
        self.say(tr.t(keys::DOPPLER_HEADING))?;
        let run = self.prompt_doppler(tr, config)?;
        run.validate()?;
        let animate = self.read_yes(tr.t(keys::PROMPT_ANIMATE))?;
        let report = app::run_doppler(
            &run,
            DopplerRunOptions {
                plot: true,
                animate,
            },
        )?;
        self.print_doppler_report(tr, &report, run.doppler.wave_speed)
    }

    pub fn print_doppler_report(
        &mut self,
        tr: &Translator,
        report: &DopplerReport,
        wave_speed: f64,
    ) -> Result<(), AppError> {
        if let Some((lo, hi)) = report.sweep.frequency_bounds() {
            self.say(&format!(
                "{} {lo:.2} – {hi:.2} Hz ({} samples)",
                tr.t(keys::DOPPLER_RESULT_RANGE),
                report.sweep.len()
            ))?;
        }
        if report.supersonic_samples > 0 {
            self.say(&format!(
                "{} {} (v > {wave_speed} m/s)",
                tr.t(keys::DOPPLER_SUPERSONIC_WARNING),
                report.supersonic_samples
            ))?;
        }
        let o = &report.outputs;
        for path in [&o.plot, &o.data, &o.sweep_animation, &o.wave_animation]
            .into_iter()
            .flatten()
        {
            self.say(&format!("{} {}", tr.t(keys::RESULT_FILE_SAVED), path.display()))?;
        }
        Ok(())
    }

    /// 생성 엔탈피 표를 출력한다.
    pub fn print_table(&mut self, tr: &Translator, table: &FormationEnthalpyTable) -> Result<(), AppError> {
        self.say(tr.t(keys::COMPOUNDS_AVAILABLE))?;
        for (name, entry) in table.entries() {
            match &entry.reference {
                Some(r) => self.say(&format!("{name}: {:.2} kJ/mol  [{r}]", entry.value_kj_per_mol))?,
                None => self.say(&format!("{name}: {:.2} kJ/mol", entry.value_kj_per_mol))?,
            }
        }
        Ok(())
    }

    fn read_preset(&mut self, tr: &Translator, default: ReactionPreset) -> Result<ReactionPreset, AppError> {
        self.say(tr.t(keys::PRESET_LIST_HEADING))?;
        for (i, preset) in ReactionPreset::ALL.iter().enumerate() {
            self.say(&format!(
                "{}) {}: {}",
                i + 1,
                preset.display_name(),
                preset.reaction()
            ))?;
        }
        let default_index = ReactionPreset::ALL
            .iter()
            .position(|p| *p == default)
            .map_or(1, |i| i + 1);
        loop {
            let n: usize = self.read_or_default(tr, tr.t(keys::PROMPT_PRESET), default_index)?;
            if let Some(p) = n.checked_sub(1).and_then(|i| ReactionPreset::ALL.get(i).copied()) {
                return Ok(p);
            }
            self.say(tr.t(keys::INVALID_SELECTION_RETRY))?;
        }
    }

    /// 사용자 정의 반응을 입력받는다. 화합물 존재 여부는 계산 시 확인한다.
    pub fn read_custom_reaction(&mut self, tr: &Translator) -> Result<Reaction, AppError> {
        let mut builder = ReactionBuilder::new();
        for heading in [keys::ENTER_REACTANTS, keys::ENTER_PRODUCTS] {
            self.say(tr.t(heading))?;
            loop {
                let compound = self.read_line(tr.t(keys::PROMPT_COMPOUND))?;
                if ReactionBuilder::is_terminator(&compound) {
                    break;
                }
                let prompt = format!("{} {compound}: ", tr.t(keys::PROMPT_COEFFICIENT));
                loop {
                    let coefficient: f64 = self.read_parsed(tr, &prompt)?;
                    match builder.push(&compound, coefficient) {
                        Ok(()) => break,
                        Err(e) => self.say(&e.to_string())?,
                    }
                }
            }
            builder.close_list();
        }
        let gas_mole_delta: i32 = self.read_parsed(tr, tr.t(keys::PROMPT_GAS_DELTA))?;
        Ok(builder.finish(gas_mole_delta)?)
    }

    /// 반응 엔탈피 메뉴를 처리한다.
    pub fn handle_enthalpy(
        &mut self,
        tr: &Translator,
        config: &Config,
        table: &FormationEnthalpyTable,
    ) -> Result<(), AppError> {
        self.say(tr.t(keys::ENTHALPY_HEADING))?;
        self.print_table(tr, table)?;
        let mode = self.read_line(tr.t(keys::ENTHALPY_MODE_PROMPT))?;
        let (reaction, key) = match mode.as_str() {
            "1" => {
                let preset = self.read_preset(tr, config.thermo.preset)?;
                (preset.reaction(), preset.key().to_string())
            }
            "2" => (self.read_custom_reaction(tr)?, "custom".to_string()),
            _ => {
                self.say(tr.t(keys::INVALID_OPTION_EXIT))?;
                return Ok(());
            }
        };
        let temperature_k =
            self.read_or_default(tr, tr.t(keys::PROMPT_TEMPERATURE), config.thermo.temperature_k)?;

        match app::run_enthalpy(config, table, &reaction, &key, temperature_k, true) {
            Ok(report) => self.print_enthalpy_report(tr, &report),
            Err(AppError::Thermo(ThermoError::UnknownCompound(name))) => {
                self.say(&format!("{} {name}", tr.t(keys::ERROR_UNKNOWN_COMPOUND)))
            }
            Err(e) => self.say(&format!("{} {e}", tr.t(keys::ERROR_UNEXPECTED))),
        }
    }

    pub fn print_enthalpy_report(&mut self, tr: &Translator, report: &EnthalpyReport) -> Result<(), AppError> {
        let e = &report.energy;
        self.say(tr.t(keys::RESULTS_HEADING))?;
        self.say(&format!("  {} {:.2} kJ", tr.t(keys::RESULT_DELTA_H), e.delta_h_kj))?;
        self.say(&format!(
            "  {} {:.2} kJ (T = {} K)",
            tr.t(keys::RESULT_DELTA_U),
            e.delta_u_kj,
            e.temperature_k
        ))?;
        let verdict = match e.heat_flow {
            HeatFlow::Exothermic => keys::RESULT_EXOTHERMIC,
            HeatFlow::Endothermic => keys::RESULT_ENDOTHERMIC,
        };
        self.say(tr.t(verdict))?;
        for path in &report.files {
            self.say(&format!("{} {}", tr.t(keys::RESULT_FILE_SAVED), path.display()))?;
        }
        Ok(())
    }

    /// 설정 메뉴를 처리한다. 빈 입력은 현재 값을 유지한다.
    pub fn handle_settings(&mut self, tr: &Translator, config: &mut Config) -> Result<(), AppError> {
        self.say(tr.t(keys::SETTINGS_HEADING))?;
        self.say(&format!(
            "{} {}",
            tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
            config.language
        ))?;
        let lang = self.read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
        if !lang.is_empty() {
            config.language = lang;
        }
        let dir = self.read_line(tr.t(keys::SETTINGS_PROMPT_OUTPUT_DIR))?;
        if !dir.is_empty() {
            config.output.directory = PathBuf::from(dir);
        }
        self.say(tr.t(keys::SETTINGS_SAVED))
    }
}
