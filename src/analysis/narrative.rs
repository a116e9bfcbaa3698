//! Templated one-line narrative per score dimension

use crate::models::BehavioralScore;
use crate::models::DimensionInsights;

/// Pick the sentence for a score: `>= 85`, `>= 70`, `>= 55`, else
fn by_tier(score: u8, templates: [&str; 4]) -> String {
    let idx = match score {
        85..=u8::MAX => 0,
        70..=84 => 1,
        55..=69 => 2,
        _ => 3,
    };
    templates[idx].replace("{score}", &score.to_string())
}

pub fn describe_visual(score: u8) -> String {
    by_tier(
        score,
        [
            "Exceptional visual consistency ({score}/100): framing, lighting and editing read as a polished catalogue.",
            "Strong visual identity ({score}/100) with recognisable framing and editing choices.",
            "Developing visual style ({score}/100); a tighter colour palette and consistent thumbnails would help.",
            "Visual presentation is still forming ({score}/100); focus on lighting and steady framing first.",
        ],
    )
}

pub fn describe_audio(score: u8) -> String {
    by_tier(
        score,
        [
            "Audio is a signature strength ({score}/100): sound choices and voice quality stay consistent.",
            "Good audio habits ({score}/100); trending sounds and clear voice-over are used well.",
            "Audio quality is acceptable ({score}/100) but uneven between videos.",
            "Audio needs attention ({score}/100); background noise and volume levels vary noticeably.",
        ],
    )
}

pub fn describe_energy(score: u8) -> String {
    by_tier(
        score,
        [
            "High-energy delivery ({score}/100) that keeps viewers watching to the end.",
            "Energetic pacing ({score}/100) with strong hooks in most videos.",
            "Moderate energy ({score}/100); faster openings could lift retention.",
            "Low perceived energy ({score}/100); try shorter cuts and a stronger first second.",
        ],
    )
}

pub fn describe_interaction(score: u8) -> String {
    by_tier(
        score,
        [
            "Outstanding audience interaction ({score}/100): likes per video far exceed the follower base norm.",
            "Healthy interaction ({score}/100); the audience responds reliably to new posts.",
            "Average interaction ({score}/100); calls to action and replies to comments could raise it.",
            "Limited interaction ({score}/100); most followers are not engaging with recent content.",
        ],
    )
}

pub fn describe_linguistic(score: u8) -> String {
    by_tier(
        score,
        [
            "Clear, distinctive voice ({score}/100) across captions and on-screen text.",
            "Consistent messaging ({score}/100) with a recognisable tone.",
            "Messaging is understandable ({score}/100) but could be more distinctive.",
            "Messaging lacks a clear voice ({score}/100); a bio and consistent captions would help.",
        ],
    )
}

pub fn describe_contextual(score: u8) -> String {
    by_tier(
        score,
        [
            "Content is highly relevant to its niche ({score}/100) and well connected to other platforms.",
            "Good contextual relevance ({score}/100) with a clear niche.",
            "Some contextual focus ({score}/100); linking other platforms would broaden reach.",
            "Weak contextual signals ({score}/100); the niche is not yet obvious to new viewers.",
        ],
    )
}

pub fn describe_environmental(score: u8) -> String {
    by_tier(
        score,
        [
            "Settings and backdrops are varied and intentional ({score}/100).",
            "Well-chosen environments ({score}/100) that support the content.",
            "Environments are functional ({score}/100) but rarely add to the story.",
            "Backdrops are repetitive or distracting ({score}/100).",
        ],
    )
}

pub fn describe_governance(score: u8) -> String {
    by_tier(
        score,
        [
            "Account metrics look organic and trustworthy ({score}/100).",
            "Mostly healthy account signals ({score}/100) with minor irregularities.",
            "Some account ratios look unusual ({score}/100) and are worth monitoring.",
            "Account ratios raise authenticity concerns ({score}/100); review follower and engagement sources.",
        ],
    )
}

pub fn describe_scores(scores: &BehavioralScore) -> DimensionInsights {
    DimensionInsights {
        visual: describe_visual(scores.visual),
        audio: describe_audio(scores.audio),
        energy: describe_energy(scores.energy),
        interaction: describe_interaction(scores.interaction),
        linguistic: describe_linguistic(scores.linguistic),
        contextual: describe_contextual(scores.contextual),
        environmental: describe_environmental(scores.environmental),
        governance: describe_governance(scores.governance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_selection() {
        assert!(describe_visual(100).starts_with("Exceptional"));
        assert!(describe_visual(85).starts_with("Exceptional"));
        assert!(describe_visual(84).starts_with("Strong"));
        assert!(describe_visual(70).starts_with("Strong"));
        assert!(describe_visual(69).starts_with("Developing"));
        assert!(describe_visual(55).starts_with("Developing"));
        assert!(describe_visual(54).starts_with("Visual presentation"));
        assert!(describe_visual(0).starts_with("Visual presentation"));
    }

    #[test]
    fn test_score_is_interpolated() {
        assert!(describe_governance(42).contains("(42/100)"));
        assert!(!describe_governance(42).contains("{score}"));
    }

    #[test]
    fn test_describe_scores_is_pure() {
        let scores = BehavioralScore {
            visual: 90,
            audio: 72,
            energy: 60,
            interaction: 10,
            linguistic: 55,
            contextual: 85,
            environmental: 69,
            governance: 85,
        };
        assert_eq!(describe_scores(&scores), describe_scores(&scores));
        assert_eq!(describe_scores(&scores).audio, describe_audio(72));
    }
}
