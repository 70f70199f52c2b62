use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use formkit_cli::script::{StepReport, parse_script, run_script};
use formkit_model::Catalog;
use formkit_typeahead::{
    AttributeMapper, Command, EngineConfig, MatcherKind, RenderList, SelectionKind,
    TypeaheadEngine,
};
use tracing::{info, info_span};

use crate::cli::{EngineArgs, MatcherArg, RankArgs, ReplayArgs};

pub fn run_rank(args: &RankArgs) -> Result<RenderList> {
    let _span = info_span!("rank", catalog = %args.catalog.display()).entered();
    let config = engine_config(&args.engine)?;
    let catalog = read_catalog(&args.catalog)?;
    let mut engine = TypeaheadEngine::new(&config);
    engine.install_catalog(catalog);
    engine.set_query(args.query.as_str());
    let list = engine.render_list();
    info!(
        options = engine.catalog().len(),
        matches = list.len(),
        limit = config.limit,
        "ranked catalog"
    );
    Ok(list)
}

pub fn run_replay(args: &ReplayArgs) -> Result<Vec<StepReport>> {
    let _span = info_span!("replay", script = %args.script.display()).entered();
    let config = engine_config(&args.engine)?;
    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let steps =
        parse_script(&raw).with_context(|| format!("parse script {}", args.script.display()))?;

    let mut mapper = AttributeMapper::new(TypeaheadEngine::new(&config));
    if let Some(path) = &args.catalog {
        let catalog = read_catalog(path)?;
        mapper
            .dispatch(Command::SetCatalog(catalog.options().to_vec()))
            .with_context(|| format!("install catalog {}", path.display()))?;
    }
    let reports = run_script(&mut mapper, &steps);
    let failed = reports.iter().filter(|report| report.is_failure()).count();
    info!(
        steps = reports.len(),
        failed,
        pending = mapper.pending(),
        "replay finished"
    );
    Ok(reports)
}

/// Load the optional config file, then apply flag overrides.
fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str::<EngineConfig>(&raw)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if let Some(matcher) = args.matcher {
        config.matcher = match matcher {
            MatcherArg::Subsequence => MatcherKind::Subsequence,
            MatcherArg::Similarity => MatcherKind::similarity(),
        };
    }
    if let Some(score) = args.min_score {
        match &mut config.matcher {
            MatcherKind::Similarity { min_score } => *min_score = score,
            MatcherKind::Subsequence => bail!("--min-score needs the similarity matcher"),
        }
    }
    if args.tagged {
        config.mode = SelectionKind::Tagged;
    }
    Ok(config)
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    Catalog::from_json(&raw).with_context(|| format!("parse catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_args() -> EngineArgs {
        EngineArgs {
            config: None,
            limit: None,
            matcher: None,
            min_score: None,
            tagged: false,
        }
    }

    #[test]
    fn min_score_applies_to_configured_similarity() {
        let dir = std::env::temp_dir().join(format!("formkit-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.json");
        fs::write(&path, r#"{"matcher": {"kind": "similarity"}}"#).unwrap();

        let args = EngineArgs {
            config: Some(path),
            min_score: Some(0.9),
            ..engine_args()
        };
        let config = engine_config(&args).unwrap();
        assert_eq!(config.matcher, MatcherKind::Similarity { min_score: 0.9 });
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn min_score_applies_to_flag_similarity() {
        let args = EngineArgs {
            matcher: Some(MatcherArg::Similarity),
            min_score: Some(0.5),
            ..engine_args()
        };
        let config = engine_config(&args).unwrap();
        assert_eq!(config.matcher, MatcherKind::Similarity { min_score: 0.5 });
    }

    #[test]
    fn min_score_without_similarity_is_rejected() {
        let args = EngineArgs {
            min_score: Some(0.5),
            ..engine_args()
        };
        assert!(engine_config(&args).is_err());
    }
}
