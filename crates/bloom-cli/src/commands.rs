//! Handlers for `bloom render` and `bloom split`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bloom_content::split;
use bloom_pipeline::{ContentChain, ContentFactory};
use serde_json::json;

use crate::cli::{FrontMatterArgs, RenderArgs, SplitArgs};
use crate::config::{BloomConfig, FrontMatterConfig};

/// Processes a document and returns the JSON (or bare content) to print.
pub fn cmd_render(config: &BloomConfig, args: &RenderArgs) -> Result<String> {
    let front_matter = apply_overrides(&config.front_matter, &args.front_matter);
    let input = read_input(&args.input)?;

    let mut factory =
        ContentFactory::new(front_matter.aggregator()).with_divider(front_matter.divider()?);

    let chain = class_chain(&args.add_class, &args.remove_class)?;
    if !chain.is_empty() {
        factory = factory.with_content_pipelines([chain]);
    }

    let document = factory
        .process(&input)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    if args.content_only {
        return Ok(document.content().to_string());
    }
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Splits a document and returns its raw front matter and body as JSON.
pub fn cmd_split(config: &BloomConfig, args: &SplitArgs) -> Result<String> {
    let front_matter = apply_overrides(&config.front_matter, &args.front_matter);
    let input = read_input(&args.input)?;
    let raw = split(&input, &front_matter.divider()?);

    Ok(serde_json::to_string_pretty(&json!({
        "front_matter": raw.meta,
        "body": raw.body,
    }))?)
}

/// Command-line flags win over the config file. A fence given on the
/// command line replaces a configured pattern.
pub fn apply_overrides(config: &FrontMatterConfig, args: &FrontMatterArgs) -> FrontMatterConfig {
    let mut merged = config.clone();
    if let Some(format) = args.format {
        merged.format = format;
    }
    if let Some(divider) = &args.divider {
        merged.divider = divider.clone();
        merged.pattern = None;
    }
    if let Some(pattern) = &args.pattern {
        merged.pattern = Some(pattern.clone());
    }
    merged
}

/// Reads the input file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Builds a content chain from `SELECTOR=CLASS` rules: additions first,
/// then removals, each in command-line order.
pub fn class_chain(add: &[String], remove: &[String]) -> Result<ContentChain> {
    let mut chain = ContentChain::new();

    for rule in add {
        let (selector, class) = parse_class_rule(rule)?;
        chain = chain.append(move |ctx| {
            ctx.add_class(&selector, &class)?;
            Ok(ctx)
        });
    }
    for rule in remove {
        let (selector, class) = parse_class_rule(rule)?;
        chain = chain.append(move |ctx| {
            ctx.remove_class(&selector, &class)?;
            Ok(ctx)
        });
    }

    Ok(chain)
}

/// Splits `SELECTOR=CLASS` on the last `=`, so attribute selectors work.
pub fn parse_class_rule(rule: &str) -> Result<(String, String)> {
    match rule.rsplit_once('=') {
        Some((selector, class)) if !selector.trim().is_empty() && !class.trim().is_empty() => {
            Ok((selector.trim().to_string(), class.trim().to_string()))
        }
        _ => bail!("Invalid class rule '{rule}', expected SELECTOR=CLASS"),
    }
}
