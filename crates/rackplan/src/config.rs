//! Resolution of the effective site and output settings.
//!
//! Priority for the site intent: CLI flags > site file > built-in defaults.
//! Output settings: CLI flags > config file > built-in defaults.

use clap::ValueEnum;

use rackplan_config::{Config, IdMode, SiteFile};
use rackplan_core::{
    CapabilityRegistry, IdGenerator, RandomIds, SequentialIds, SitePlan, Topology, plan,
};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a command handler needs besides its own arguments.
pub struct Session {
    pub registry: CapabilityRegistry,
    pub output: OutputFormat,
    pub color: bool,
    ids: IdMode,
}

impl Session {
    pub fn new(global: &GlobalOpts, cfg: &Config) -> Result<Self, CliError> {
        let output = match &global.output {
            Some(format) => format.clone(),
            None => parse_value::<OutputFormat>("defaults.output", &cfg.defaults.output)?,
        };
        let color_mode = match &global.color {
            Some(mode) => mode.clone(),
            None => parse_value::<ColorMode>("defaults.color", &cfg.defaults.color)?,
        };
        let ids = if global.random_ids {
            IdMode::Random
        } else {
            cfg.defaults.ids
        };
        Ok(Self {
            registry: cfg.registry()?,
            output,
            color: output::should_color(&color_mode),
            ids,
        })
    }

    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.ids {
            IdMode::Sequential => Box::new(SequentialIds::new()),
            IdMode::Random => Box::new(RandomIds),
        }
    }

    /// Solve the effective site and replay its manual edits.
    pub fn solve(&self, global: &GlobalOpts) -> Result<Topology, CliError> {
        let site = resolve_site(global)?;
        let plan_input: SitePlan = site.to_plan(&self.registry)?;
        let mut ids = self.id_generator();
        let mut topology = plan(&plan_input, &self.registry, ids.as_mut())?;
        site.apply_edits(&mut topology, &self.registry, ids.as_mut())?;
        Ok(topology)
    }
}

fn parse_value<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// The site file named by `--site` (or an empty one) with the intent flags
/// layered on top.
pub fn resolve_site(global: &GlobalOpts) -> Result<SiteFile, CliError> {
    let mut site = match &global.site {
        Some(path) => rackplan_config::load_site(path)?,
        None => SiteFile::default(),
    };
    apply_flags(&mut site, global)?;
    Ok(site)
}

fn apply_flags(site: &mut SiteFile, global: &GlobalOpts) -> Result<(), CliError> {
    let intent = &mut site.intent;
    if let Some(family) = &global.family {
        // Module choices belong to the family they were made for.
        if !family.eq_ignore_ascii_case(&intent.family) {
            tracing::debug!(from = %intent.family, to = %family, "family switched, modules reset");
            site.modules.clear();
        }
        intent.family.clone_from(family);
    }
    if let Some(sectors) = global.sectors {
        intent.sectors = sectors;
    }
    if !global.bands.is_empty() {
        intent.bands.clone_from(&global.bands);
    }
    if let Some(mimo) = &global.mimo {
        intent.mimo.clone_from(mimo);
    }
    if let Some(links) = global.tdd_links {
        intent.tdd_links = links;
    }
    for raw in &global.modules {
        let (band, hardware) = parse_module(raw)?;
        // File keys keep the user's spelling; drop any alias of this band.
        site.modules.retain(|key, _| !key.trim().eq_ignore_ascii_case(&band));
        site.modules.insert(band, hardware);
    }
    Ok(())
}

/// `BAND=TYPE` → (band, type), both trimmed. The band key is normalized to
/// upper case so a flag replaces a file entry regardless of spelling.
fn parse_module(raw: &str) -> Result<(String, String), CliError> {
    let invalid = || CliError::Validation {
        field: "module".into(),
        reason: format!("expected BAND=TYPE, got '{raw}'"),
    };
    let (band, hardware) = raw.split_once('=').ok_or_else(invalid)?;
    let (band, hardware) = (band.trim(), hardware.trim());
    if band.is_empty() || hardware.is_empty() {
        return Err(invalid());
    }
    Ok((band.to_ascii_uppercase(), hardware.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["rackplan"];
        argv.extend_from_slice(args);
        argv.push("topology");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn module_flag_parses() {
        assert_eq!(
            parse_module(" l1800 = AHEGC ").unwrap(),
            ("L1800".into(), "AHEGC".into())
        );
        assert!(matches!(
            parse_module("L1800"),
            Err(CliError::Validation { .. })
        ));
        assert!(parse_module("=AHEGC").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let site = resolve_site(&global(&[
            "--family",
            "micro",
            "--sectors",
            "1",
            "--band",
            "L1800,L2100",
            "--mimo",
            "4x4",
        ]))
        .unwrap();
        assert_eq!(site.intent.family, "micro");
        assert_eq!(site.intent.sectors, 1);
        assert_eq!(site.intent.bands, vec!["L1800", "L2100"]);
        assert_eq!(site.intent.mimo, "4x4");
    }

    #[test]
    fn family_switch_drops_file_modules_but_keeps_flag_modules() {
        let mut site = SiteFile::default();
        site.modules.insert("L2600".into(), "AHHB".into());
        apply_flags(
            &mut site,
            &global(&["--family", "micro", "--module", "L1800=AHEJ"]),
        )
        .unwrap();
        assert_eq!(site.modules.len(), 1);
        assert_eq!(site.modules.get("L1800").map(String::as_str), Some("AHEJ"));
    }

    #[test]
    fn module_flag_replaces_file_entry_in_any_case() {
        let mut site = SiteFile::default();
        site.intent.family = "macro_dual".into();
        site.modules.insert("nr3500".into(), "AKQA".into());
        site.modules.insert(" L1800".into(), "AHEGC".into());
        apply_flags(&mut site, &global(&["--module", "NR3500=AZQI"])).unwrap();

        assert_eq!(site.modules.len(), 2);
        assert_eq!(site.modules.get("NR3500").map(String::as_str), Some("AZQI"));
        assert!(!site.modules.contains_key("nr3500"));
    }

    #[test]
    fn session_honours_config_defaults() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.defaults.color = "never".into();
        let session = Session::new(&global(&[]), &cfg).unwrap();
        assert!(matches!(session.output, OutputFormat::Yaml));
        assert!(!session.color);

        cfg.defaults.output = "xml".into();
        assert!(matches!(
            Session::new(&global(&[]), &cfg),
            Err(CliError::Validation { ref field, .. }) if field == "defaults.output"
        ));
    }

    #[test]
    fn sequential_solve_is_reproducible() {
        let session = Session::new(&global(&[]), &Config::default()).unwrap();
        let opts = global(&["--band", "L1800,L2100,NR3500"]);
        let first = session.solve(&opts).unwrap();
        let second = session.solve(&opts).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.connections.len(), 3);
    }
}
