//! Option ranking for transport segments.
//!
//! Ranks the alternatives for one city pair and hands out badges so the
//! presentation layer can highlight the most useful choices.

use std::cmp::Ordering;

use crate::config::EngineConfig;
use crate::domain::{Badge, TransportOption};

/// Weighted score of an option; lower is better.
///
/// Hours are weighted by `time_weight` and the relative cost by
/// `cost_weight`. Options with no duration have no score.
pub fn score(option: &TransportOption, config: &EngineConfig) -> Option<f64> {
    let hours = option.duration.representative()?.num_minutes() as f64 / 60.0;
    let cost = option.relative_cost.unwrap_or(0.0);
    Some(hours * config.time_weight + cost * config.cost_weight)
}

/// Sort options best-first and assign badges.
///
/// Options are sorted by score (unscored last, order otherwise stable).
/// Then:
/// 1. the lowest score gets `Best`
/// 2. the shortest duration gets `Fastest`
/// 3. the lowest cost gets `Cheapest`
///
/// Each badge is given at most once, and an option keeps the first badge
/// it receives.
pub fn rank_options(mut options: Vec<TransportOption>, config: &EngineConfig) -> Vec<TransportOption> {
    options.sort_by(|a, b| compare_scores(score(a, config), score(b, config)));

    for option in &mut options {
        option.badge = Badge::None;
    }

    if let Some(i) = argmin(&options, |o| score(o, config)) {
        options[i].badge = Badge::Best;
    }

    if let Some(i) = argmin(&options, |o| {
        o.duration.representative().map(|d| d.num_minutes() as f64)
    }) && options[i].badge == Badge::None
    {
        options[i].badge = Badge::Fastest;
    }

    if let Some(i) = argmin(&options, |o| o.relative_cost)
        && options[i].badge == Badge::None
    {
        options[i].badge = Badge::Cheapest;
    }

    options
}

/// Index of the option with the fastest duration.
pub fn fastest(options: &[TransportOption]) -> Option<usize> {
    argmin(options, |o| {
        o.duration.representative().map(|d| d.num_minutes() as f64)
    })
}

fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First index with the smallest key; `None` keys are skipped.
fn argmin<F>(options: &[TransportOption], key: F) -> Option<usize>
where
    F: Fn(&TransportOption) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, option) in options.iter().enumerate() {
        let Some(k) = key(option) else { continue };
        match best {
            Some((_, b)) if k >= b => {}
            _ => best = Some((i, k)),
        }
    }
    best.map(|(i, _)| i)
}
