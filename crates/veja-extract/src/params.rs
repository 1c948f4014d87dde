//! Free-text generation-parameter parsing.
//!
//! Generation tools embed parameters as a loosely structured blob:
//!
//! ```text
//! positive prompt text, possibly
//! spanning lines
//! Negative prompt: negative prompt text
//! Steps: 20, Sampler: Euler a, CFG Scale: 7, Seed: 12345, Size: 512x512, Model: sd_xl_base
//! ```
//!
//! Some tools additionally embed a `Civitai resources:` JSON array naming
//! the checkpoint and auxiliary models with registry version ids and hashes.
//!
//! The convention evolves upstream, so this parser is best-effort by
//! design: a field the regexes fail to match stays at its default, and the
//! tests pin the convention as currently understood.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use veja_core::{GenerationMetadata, LoraRef};

/// First `\n<Letters and spaces>:` marks the boundary between the prompt
/// block and everything keyed.
static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n([A-Za-z ]+):").unwrap());

static NEGATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Negative prompt:(.*?)(\n|$)").unwrap());

static CIVITAI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Civitai resources:\s*(\[[^\]]+\])").unwrap());

static MODEL_RE: Lazy<Regex> = Lazy::new(|| field_regex("Model"));
static SAMPLER_RE: Lazy<Regex> = Lazy::new(|| field_regex("Sampler"));
static SCHEDULER_RE: Lazy<Regex> = Lazy::new(|| field_regex("Schedule type"));
static SEED_RE: Lazy<Regex> = Lazy::new(|| field_regex("Seed"));
static CFG_SCALE_RE: Lazy<Regex> = Lazy::new(|| field_regex("CFG Scale"));
static STEPS_RE: Lazy<Regex> = Lazy::new(|| field_regex("Steps"));
static SIZE_RE: Lazy<Regex> = Lazy::new(|| field_regex("Size"));

/// `Key: value` scan for one parameter-line alias; value runs to the next
/// comma or newline.
fn field_regex(alias: &str) -> Regex {
    Regex::new(&format!(r"(?i){}:\s*([^,\n]+)", alias)).unwrap()
}

fn field_value(text: &str, re: &Regex) -> Option<String> {
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// One entry of the embedded `Civitai resources:` array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CivitaiResource {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    model_version_id: Option<i64>,
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
}

/// Parse a recovered text blob into a structured record.
///
/// Every field is optional in the source: missing fields keep their
/// defaults, numeric parse failures keep their defaults, and text with no
/// recognizable parameter boundary at all becomes the prompt verbatim.
/// Deterministic and stateless: parsing the same text twice yields
/// structurally equal records.
pub fn parse(text: &str) -> GenerationMetadata {
    let mut meta = GenerationMetadata::default();

    let Some(boundary) = BOUNDARY_RE.find(text) else {
        meta.prompt = text.trim().to_string();
        return meta;
    };

    let head = &text[..boundary.start()];
    meta.prompt = head
        .strip_prefix("Negative prompt:")
        .unwrap_or(head)
        .trim()
        .to_string();

    if let Some(captures) = NEGATIVE_RE.captures(text) {
        meta.negative_prompt = captures[1].trim().to_string();
    }

    let civitai_set_model = apply_civitai_resources(text, &mut meta);

    if !civitai_set_model {
        if let Some(value) = field_value(text, &MODEL_RE) {
            meta.model = value;
        }
    }
    if let Some(value) = field_value(text, &SAMPLER_RE) {
        meta.sampler = value;
    }
    if let Some(value) = field_value(text, &SCHEDULER_RE) {
        meta.scheduler = value;
    }
    if let Some(value) = field_value(text, &SEED_RE) {
        meta.seed = value;
    }
    if let Some(value) = field_value(text, &SIZE_RE) {
        meta.size = value;
    }
    if let Some(value) = field_value(text, &STEPS_RE) {
        if let Ok(steps) = value.parse::<u32>() {
            meta.steps = steps;
        }
    }
    if let Some(value) = field_value(text, &CFG_SCALE_RE) {
        if let Ok(cfg_scale) = value.parse::<f64>() {
            meta.cfg_scale = cfg_scale;
        }
    }

    meta
}

/// Apply the structured `Civitai resources:` array when present.
///
/// Checkpoint entries name the base model; lora entries append auxiliary
/// refs in source order. Returns whether a checkpoint entry set `model`,
/// in which case the generic `Model:` scan must not overwrite it.
fn apply_civitai_resources(text: &str, meta: &mut GenerationMetadata) -> bool {
    let Some(captures) = CIVITAI_RE.captures(text) else {
        return false;
    };
    let Ok(resources) = serde_json::from_str::<Vec<CivitaiResource>>(&captures[1]) else {
        return false;
    };

    let mut set_model = false;
    for resource in resources {
        match resource.kind.as_str() {
            "checkpoint" => {
                if let Some(name) = resource.model_name {
                    meta.model = name;
                    set_model = true;
                }
            }
            "lora" => meta.loras.push(LoraRef {
                id: resource.model_version_id,
                hash: resource.hash.unwrap_or_default(),
                name: resource.model_name.unwrap_or_default(),
                weight: resource.weight,
            }),
            _ => {}
        }
    }
    set_model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_parameter_line() {
        let text = "best quality\nNegative prompt: blurry, low quality\nSteps: 30, CFG Scale: 7.5, Sampler: Euler a, Seed: 123, Size: 512x768";
        let meta = parse(text);
        assert_eq!(meta.prompt, "best quality");
        assert_eq!(meta.negative_prompt, "blurry, low quality");
        assert_eq!(meta.steps, 30);
        assert_eq!(meta.cfg_scale, 7.5);
        assert_eq!(meta.sampler, "Euler a");
        assert_eq!(meta.seed, "123");
        assert_eq!(meta.size, "512x768");
    }

    #[test]
    fn test_parse_prompt_only() {
        let meta = parse("  just a prompt with no params  ");
        let expected = GenerationMetadata {
            prompt: "just a prompt with no params".to_string(),
            ..Default::default()
        };
        assert_eq!(meta, expected);
    }

    #[test]
    fn test_parse_multiline_prompt() {
        let text = "a cat,\nmasterpiece, detailed fur\nSteps: 20, Seed: 42";
        let meta = parse(text);
        assert_eq!(meta.prompt, "a cat,\nmasterpiece, detailed fur");
        assert_eq!(meta.steps, 20);
        assert_eq!(meta.seed, "42");
    }

    #[test]
    fn test_parse_no_negative_prompt() {
        let text = "landscape\nSteps: 25, Sampler: DPM++ 2M";
        let meta = parse(text);
        assert_eq!(meta.prompt, "landscape");
        assert!(meta.negative_prompt.is_empty());
        assert_eq!(meta.sampler, "DPM++ 2M");
    }

    #[test]
    fn test_parse_scheduler_alias() {
        let text = "prompt\nSteps: 20, Schedule type: Karras";
        let meta = parse(text);
        assert_eq!(meta.scheduler, "Karras");
    }

    #[test]
    fn test_parse_model_field() {
        let text = "prompt\nSteps: 20, Model: sd_xl_base_1.0";
        let meta = parse(text);
        assert_eq!(meta.model, "sd_xl_base_1.0");
    }

    #[test]
    fn test_parse_numeric_failure_keeps_default() {
        let text = "prompt\nSteps: twenty, CFG Scale: high";
        let meta = parse(text);
        assert_eq!(meta.steps, 0);
        assert_eq!(meta.cfg_scale, 0.0);
    }

    #[test]
    fn test_parse_non_numeric_seed_kept_as_string() {
        let text = "prompt\nSeed: 18446744073709551616, Steps: 20";
        let meta = parse(text);
        // Overflows u64; the string field carries it anyway
        assert_eq!(meta.seed, "18446744073709551616");
    }

    #[test]
    fn test_parse_civitai_resources_loras() {
        let text = concat!(
            "prompt\n",
            r#"Steps: 20, Civitai resources: [{"type":"lora","modelVersionId":111,"modelName":"StyleX","hash":"abc123"},{"type":"lora","modelVersionId":222,"modelName":"DetailY"}]"#
        );
        let meta = parse(text);
        assert_eq!(meta.loras.len(), 2);
        assert_eq!(meta.loras[0].id, Some(111));
        assert_eq!(meta.loras[0].hash, "abc123");
        assert_eq!(meta.loras[0].name, "StyleX");
        assert_eq!(meta.loras[1].id, Some(222));
        assert!(meta.loras[1].hash.is_empty());
        assert_eq!(meta.loras[1].name, "DetailY");
    }

    #[test]
    fn test_parse_civitai_checkpoint_wins_over_model_scan() {
        let text = concat!(
            "prompt\n",
            r#"Model: generic_scan_name, Civitai resources: [{"type":"checkpoint","modelVersionId":10,"modelName":"Canonical XL"}]"#
        );
        let meta = parse(text);
        assert_eq!(meta.model, "Canonical XL");
    }

    #[test]
    fn test_parse_civitai_weight_preserved() {
        let text = concat!(
            "prompt\n",
            r#"Steps: 20, Civitai resources: [{"type":"lora","modelVersionId":7,"modelName":"Soft Light","weight":0.8}]"#
        );
        let meta = parse(text);
        assert_eq!(meta.loras[0].weight, Some(0.8));
    }

    #[test]
    fn test_parse_civitai_malformed_json_ignored() {
        let text = "prompt\nSteps: 20, Civitai resources: [not valid json], Model: fallback";
        let meta = parse(text);
        assert!(meta.loras.is_empty());
        assert_eq!(meta.model, "fallback");
        assert_eq!(meta.steps, 20);
    }

    #[test]
    fn test_parse_negative_prompt_case_insensitive() {
        let text = "prompt\nnegative prompt: worst quality\nSteps: 20";
        let meta = parse(text);
        assert_eq!(meta.negative_prompt, "worst quality");
    }

    #[test]
    fn test_parse_leading_negative_prompt_prefix_stripped() {
        // Degenerate blob with no positive prompt at all: the head before
        // the first boundary is the negative line itself
        let text = "Negative prompt: blurry\nSteps: 20";
        let meta = parse(text);
        assert_eq!(meta.prompt, "blurry");
        assert_eq!(meta.negative_prompt, "blurry");
        assert_eq!(meta.steps, 20);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "a cat\nNegative prompt: dog\nSteps: 20, CFG Scale: 7, Seed: 9";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_empty_text() {
        let meta = parse("");
        assert!(meta.is_empty());
    }
}
