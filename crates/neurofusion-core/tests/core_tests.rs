//! Tests for neurofusion-core: vocabularies, proposals, snapshots, config, errors

use neurofusion_core::*;
use serde_json::json;

// ===========================================================================
// Moment
// ===========================================================================

#[test]
fn moment_ids_cover_m01_to_m22() {
    let ids: Vec<&str> = Moment::ALL.iter().map(|m| m.id()).collect();
    assert_eq!(ids.len(), 22);
    assert_eq!(ids[0], "M01");
    assert_eq!(ids[21], "M22");
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(*id, format!("M{:02}", i + 1));
    }
}

#[test]
fn moment_parses_from_id() {
    assert_eq!("M10".parse::<Moment>().unwrap(), Moment::Fatigue);
    assert_eq!("M22".parse::<Moment>().unwrap(), Moment::PlateauEscape);
}

#[test]
fn moment_rejects_unknown_id() {
    let err = "M23".parse::<Moment>().unwrap_err();
    assert!(matches!(err, Error::UnknownMoment(ref s) if s == "M23"));
}

#[test]
fn moment_serializes_as_id() {
    assert_eq!(serde_json::to_string(&Moment::AttentionDrop).unwrap(), r#""M01""#);
    let back: Moment = serde_json::from_str(r#""M16""#).unwrap();
    assert_eq!(back, Moment::WorkingMemoryOverflow);
    assert_eq!(format!("{}", Moment::Frustration), "M07");
}

// ===========================================================================
// InterventionKind
// ===========================================================================

#[test]
fn intervention_kind_snake_case() {
    assert_eq!(
        serde_json::to_string(&InterventionKind::SkipToChallenge).unwrap(),
        r#""skip_to_challenge""#
    );
    for kind in InterventionKind::ALL {
        assert_eq!(kind.as_str().parse::<InterventionKind>().unwrap(), kind);
        assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.as_str()));
    }
}

#[test]
fn intervention_kind_rejects_unknown() {
    assert!(matches!(
        "teleport".parse::<InterventionKind>(),
        Err(Error::UnknownInterventionKind(_))
    ));
}

// ===========================================================================
// Urgency
// ===========================================================================

#[test]
fn urgency_rank_table() {
    assert_eq!(Urgency::Critical.rank(), 4);
    assert_eq!(Urgency::High.rank(), 3);
    assert_eq!(Urgency::Medium.rank(), 2);
    assert_eq!(Urgency::Low.rank(), 1);
}

#[test]
fn urgency_orders_by_rank() {
    assert!(Urgency::Critical > Urgency::High);
    assert!(Urgency::High > Urgency::Medium);
    assert!(Urgency::Medium > Urgency::Low);
    let mut v = vec![Urgency::Low, Urgency::Critical, Urgency::Medium, Urgency::High];
    v.sort();
    assert_eq!(v, vec![Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Critical]);
}

#[test]
fn urgency_rejects_unknown_value() {
    let err = "urgent".parse::<Urgency>().unwrap_err();
    assert!(matches!(err, Error::UnknownUrgency(_)));
    assert_eq!(err.to_string(), "unknown urgency: urgent");
}

#[test]
fn urgency_deserialize_rejects_unknown() {
    assert!(serde_json::from_str::<Urgency>(r#""asap""#).is_err());
    assert_eq!(serde_json::from_str::<Urgency>(r#""critical""#).unwrap(), Urgency::Critical);
}

// ===========================================================================
// InterventionProposal
// ===========================================================================

fn sample_proposal() -> InterventionProposal {
    InterventionProposal::builder(Moment::Fatigue, "fatigue_agent", InterventionKind::ForceBreak)
        .urgency(Urgency::Critical)
        .confidence(0.9)
        .payload(json!({"break_duration_seconds": 120}))
        .signals(["behavioral_variance_erratic", "session_duration_long"])
        .cooldown_seconds(1200)
        .timestamp(1_000.0)
        .build()
        .unwrap()
}

#[test]
fn proposal_builder_sets_fields() {
    let p = sample_proposal();
    assert_eq!(p.moment_id(), Moment::Fatigue);
    assert_eq!(p.agent_name(), "fatigue_agent");
    assert_eq!(p.intervention_type(), InterventionKind::ForceBreak);
    assert_eq!(p.urgency(), Urgency::Critical);
    assert_eq!(p.confidence(), 0.9);
    assert_eq!(p.payload()["break_duration_seconds"], json!(120));
    assert_eq!(p.signals_supporting().len(), 2);
    assert_eq!(p.cooldown_seconds(), 1200);
    assert_eq!(p.timestamp(), 1_000.0);
}

#[test]
fn proposal_builder_defaults() {
    let p = InterventionProposal::builder(Moment::KnowledgeGap, "gap_agent", InterventionKind::ExplainConcept)
        .build()
        .unwrap();
    assert_eq!(p.urgency(), Urgency::Medium);
    assert_eq!(p.confidence(), 0.0);
    assert!(p.payload().is_empty());
    assert!(p.signals_supporting().is_empty());
    assert_eq!(p.cooldown_seconds(), 120);
}

#[test]
fn proposal_ids_are_unique() {
    assert_ne!(sample_proposal().intervention_id(), sample_proposal().intervention_id());
}

#[test]
fn proposal_rejects_confidence_above_one() {
    let err = InterventionProposal::builder(Moment::Fatigue, "a", InterventionKind::ForceBreak)
        .confidence(1.2)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidProposal { field: "confidence", .. }));
}

#[test]
fn proposal_rejects_nan_confidence() {
    let result = InterventionProposal::builder(Moment::Fatigue, "a", InterventionKind::ForceBreak)
        .confidence(f64::NAN)
        .build();
    assert!(result.is_err());
}

#[test]
fn proposal_rejects_empty_agent_name() {
    let err = InterventionProposal::builder(Moment::Fatigue, "  ", InterventionKind::ForceBreak)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidProposal { field: "agent_name", .. }));
}

#[test]
fn proposal_rejects_negative_timestamp() {
    let result = InterventionProposal::builder(Moment::Fatigue, "a", InterventionKind::ForceBreak)
        .timestamp(-1.0)
        .build();
    assert!(result.is_err());
}

#[test]
fn proposal_payload_ignores_non_objects() {
    let p = InterventionProposal::builder(Moment::Fatigue, "a", InterventionKind::ForceBreak)
        .payload(json!([1, 2, 3]))
        .payload(json!({"k": "v"}))
        .build()
        .unwrap();
    assert_eq!(p.payload().len(), 1);
}

#[test]
fn proposal_serializes_wire_names() {
    let value = serde_json::to_value(sample_proposal()).unwrap();
    assert_eq!(value["moment_id"], "M10");
    assert_eq!(value["intervention_type"], "force_break");
    assert_eq!(value["urgency"], "critical");
    assert_eq!(value["cooldown_seconds"], 1200);
}

#[test]
fn proposal_deserialize_validates() {
    let ok = json!({
        "moment_id": "M01",
        "agent_name": "attention_agent",
        "intervention_type": "pause_video",
        "urgency": "high",
        "confidence": 0.85
    });
    let p: InterventionProposal = serde_json::from_value(ok).unwrap();
    assert_eq!(p.moment_id(), Moment::AttentionDrop);
    assert_eq!(p.cooldown_seconds(), 120);

    let bad_urgency = json!({
        "moment_id": "M01",
        "agent_name": "attention_agent",
        "intervention_type": "pause_video",
        "urgency": "whenever"
    });
    assert!(serde_json::from_value::<InterventionProposal>(bad_urgency).is_err());

    let bad_confidence = json!({
        "moment_id": "M01",
        "agent_name": "attention_agent",
        "intervention_type": "pause_video",
        "confidence": 3.0
    });
    assert!(serde_json::from_value::<InterventionProposal>(bad_confidence).is_err());
}

// ===========================================================================
// AgentEvaluation
// ===========================================================================

#[test]
fn evaluation_no_action_is_empty() {
    let e = AgentEvaluation::no_action("memory_agent", "No chunk overflow risk");
    assert!(e.detected_moments.is_empty());
    assert!(!e.has_interventions());
    assert_eq!(e.confidence, 0.0);
}

#[test]
fn evaluation_failed_carries_reason() {
    let e = AgentEvaluation::failed("broken_agent", "boom");
    assert_eq!(e.agent_name, "broken_agent");
    assert_eq!(e.confidence, 0.0);
    assert_eq!(e.reasoning, "Error: boom");
}

#[test]
fn evaluation_suppressed_keeps_moments() {
    let e = AgentEvaluation::suppressed("fatigue_agent", vec![Moment::Fatigue], 0.8, "cooldown");
    assert_eq!(e.detected_moments, vec![Moment::Fatigue]);
    assert!(!e.has_interventions());
}

// ===========================================================================
// Signals and snapshot
// ===========================================================================

#[test]
fn webcam_defaults_assume_face_present() {
    let w = WebcamSignals::default();
    assert!(w.face_detected);
    assert_eq!(w.attention_score, 0.8);
}

#[test]
fn partial_signal_json_uses_defaults() {
    let b: BehavioralSignals = serde_json::from_str(r#"{"fatigue_score": 0.85}"#).unwrap();
    assert_eq!(b.fatigue_score, 0.85);
    assert_eq!(b.response_time_trend, ResponseTimeTrend::Stable);

    let frame: SignalFrame = serde_json::from_str(r#"{"behavioral": {"frustration_score": 0.5}}"#).unwrap();
    assert!(frame.webcam.is_none());
    assert!(frame.nlp.is_none());
}

#[test]
fn snapshot_from_frame_fills_knowledge_default() {
    let frame = SignalFrame::new(BehavioralSignals { fatigue_score: 0.3, ..Default::default() })
        .at_position(42_000.0)
        .with_session_minutes(12.5);
    let snap = FusionSnapshot::from_frame("s1", "stu1", 100.0, 7, frame, vec![Moment::Fatigue]);
    assert_eq!(snap.cycle_number, 7);
    assert_eq!(snap.timestamp, 100.0);
    assert_eq!(snap.knowledge, KnowledgeSignals::default());
    assert_eq!(snap.lesson_position_ms, 42_000.0);
    assert_eq!(snap.session_duration_minutes, 12.5);
    assert_eq!(snap.recent_interventions, vec![Moment::Fatigue]);
    assert!(snap.agent_states.is_empty());
    assert!(snap.proposed_interventions.is_empty());
}

// ===========================================================================
// Config
// ===========================================================================

#[test]
fn config_defaults() {
    let c = FusionConfig::default();
    assert_eq!(c.cycle.interval_ms, 250);
    assert_eq!(c.cycle.max_interventions, 2);
    assert_eq!(c.cycle.recent_window_secs, 300.0);
    assert_eq!(c.attention.cooldown_secs, 120);
    assert_eq!(c.fatigue.threshold, 0.75);
    assert_eq!(c.fatigue.cooldown_secs, 1200);
    assert_eq!(c.conflicts.pairs.len(), 4);
    assert!(c.validate().is_ok());
}

#[test]
fn config_partial_toml_keeps_other_defaults() {
    let c = FusionConfig::from_toml("[fatigue]\nthreshold = 0.6\n").unwrap();
    assert_eq!(c.fatigue.threshold, 0.6);
    assert_eq!(c.fatigue.cooldown_secs, 1200);
    assert_eq!(c.engagement.frustration_rescue, 0.70);
}

#[test]
fn config_toml_roundtrip() {
    let c = FusionConfig::default();
    let text = c.to_toml();
    assert!(text.contains("[cycle]"));
    let back = FusionConfig::from_toml(&text).unwrap();
    assert_eq!(back, c);
}

#[test]
fn config_rejects_out_of_range_threshold() {
    let err = FusionConfig::from_toml("[fatigue]\nthreshold = 1.5\n").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn config_rejects_zero_max_interventions() {
    let err = FusionConfig::from_toml("[cycle]\nmax_interventions = 0\n").unwrap_err();
    assert!(err.to_string().contains("max_interventions"));
}

#[test]
fn config_rejects_unknown_conflict_kind() {
    let err = FusionConfig::from_toml("[conflicts]\npairs = [[\"pause_video\", \"dance\"]]\n").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn config_conflict_pairs_resolve() {
    let pairs = FusionConfig::default().conflict_pairs().unwrap();
    assert!(pairs.contains(&(InterventionKind::PauseVideo, InterventionKind::ForceBreak)));
    assert!(pairs.contains(&(InterventionKind::SkipToChallenge, InterventionKind::ExplainConcept)));
}

#[test]
fn config_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let c = FusionConfig::load(&dir.path().join("missing.toml"));
    assert_eq!(c, FusionConfig::default());
}

#[test]
fn config_load_invalid_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fusion.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    assert_eq!(FusionConfig::load(&path), FusionConfig::default());
    assert!(matches!(FusionConfig::try_load(&path), Err(Error::TomlError(_))));
}

#[test]
fn config_load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fusion.toml");
    std::fs::write(&path, "[attention]\ncooldown_secs = 60\n").unwrap();
    assert_eq!(FusionConfig::load(&path).attention.cooldown_secs, 60);
    assert!(matches!(
        FusionConfig::try_load(&dir.path().join("nope.toml")),
        Err(Error::IoError(_))
    ));
}

// ===========================================================================
// Error
// ===========================================================================

#[test]
fn error_display_formats() {
    assert_eq!(
        Error::agent_failed("gap_agent", "boom").to_string(),
        "agent error: gap_agent - boom"
    );
    assert_eq!(
        Error::invalid_proposal("confidence", "too high").to_string(),
        "invalid proposal: confidence - too high"
    );
    assert_eq!(Error::ConfigError("bad".into()).to_string(), "config error: bad");
}
