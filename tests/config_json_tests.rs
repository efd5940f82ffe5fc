use chart_primitives::animation::Easing;
use chart_primitives::components::{
    AreaConfig, AxisConfig, AxisPlacement, GridLineConfig, JsonConfig, LineAnimation, LineConfig,
    TooltipConfig,
};

#[test]
fn empty_objects_take_component_defaults() {
    let axis = AxisConfig::from_json_str("{}").expect("axis config");
    assert_eq!(axis, AxisConfig::default());
    assert_eq!(axis.placement, AxisPlacement::Bottom);
    assert_eq!(axis.ticks, 0);
    assert_eq!(axis.font_size, "0.75rem");
    assert!(!axis.reserve_first_tick);
    assert_eq!(axis.transition.duration_ms, 250);

    let line = LineConfig::from_json_str("{}").expect("line config");
    assert_eq!(line.color, "white");
    assert_eq!(line.animation, LineAnimation::Left);
    assert!(!line.disable_animation);

    let tooltip = TooltipConfig::from_json_str("{}").expect("tooltip config");
    assert_eq!(tooltip.point_radius, 4.0);
    assert_eq!(tooltip.width, 0.0);
}

#[test]
fn camel_case_variants_and_type_field_parse() {
    let axis = AxisConfig::from_json_str(
        r#"{
            "type": "left",
            "ticks": 6,
            "disable_animation": true,
            "transform": "translate(40,0)",
            "attributes": {"id": "y-axis"},
            "transition": {"duration_ms": 400, "easing": "cubicInOut"}
        }"#,
    )
    .expect("axis config");
    assert_eq!(axis.placement, AxisPlacement::Left);
    assert_eq!(axis.ticks, 6);
    assert!(axis.disable_animation);
    assert_eq!(axis.attributes.get("id").map(String::as_str), Some("y-axis"));
    assert_eq!(axis.transition.easing, Easing::CubicInOut);
    assert_eq!(axis.transition.spec().duration.as_millis(), 400);

    let line = LineConfig::from_json_str(r#"{"animation":"fadeIn","smooth":true,"disable_animation":true}"#)
        .expect("line");
    assert_eq!(line.animation, LineAnimation::FadeIn);
    assert!(line.smooth);
    assert!(line.disable_animation);
}

#[test]
fn string_transition_is_read_as_the_positioning_transform() {
    let axis = AxisConfig::from_json_str(r#"{"type":"left","transition":"translate(10,20)"}"#)
        .expect("axis config");
    assert_eq!(axis.transform.as_deref(), Some("translate(10,20)"));
    assert_eq!(axis.transition.duration_ms, 250);

    let grid = GridLineConfig::from_json_str(r#"{"transition":"translate(0,40)","ticks":4}"#)
        .expect("grid config");
    assert_eq!(grid.transform.as_deref(), Some("translate(0,40)"));
    assert_eq!(grid.ticks, 4);

    let explicit = AxisConfig::from_json_str(
        r#"{"transition":"translate(1,1)","transform":"translate(2,2)"}"#,
    )
    .expect("axis config");
    assert_eq!(explicit.transform.as_deref(), Some("translate(2,2)"));
}

#[test]
fn pretty_json_round_trips() {
    let area = AreaConfig::default()
        .with_color("#0ea5e9")
        .with_gradient(true)
        .with_attr("data-series", "revenue");
    let json = area.to_json_pretty().expect("serialize");
    assert!(json.contains("\"gradient\": true"));
    assert_eq!(AreaConfig::from_json_str(&json).expect("parse"), area);
}

#[test]
fn malformed_json_is_an_invalid_input_error() {
    let error = AxisConfig::from_json_str(r#"{"type":"diagonal"}"#).expect_err("unknown placement");
    assert!(error.to_string().contains("failed to parse config"));
}
