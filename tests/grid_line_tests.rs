use std::rc::Rc;
use std::time::Duration;

use chart_primitives::GridLine;
use chart_primitives::animation::ManualFrameClock;
use chart_primitives::components::{GridLineConfig, GridOrientation, JsonConfig};
use chart_primitives::core::{LinearScale, SharedScale};

fn scale(range_end: f64) -> SharedScale {
    Rc::new(
        LinearScale::new(0.0, 4.0)
            .and_then(|scale| scale.with_range(0.0, range_end))
            .expect("valid scale"),
    )
}

#[test]
fn vertical_lines_extend_upward_by_size() {
    let grid = GridLine::new(
        GridLineConfig::new(GridOrientation::Vertical)
            .with_ticks(5)
            .with_size(120.0)
            .with_disable_animation(true),
        scale(200.0),
        ManualFrameClock::default(),
    );

    let root = grid.render();
    let lines = root.select_all("line");
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| line.attr("y2") == Some("-120")));
    assert!(lines.iter().all(|line| line.attr("x2").is_none()));
    assert!(root.select("text").is_none());

    let ticks = root.select_all("g.tick");
    assert_eq!(ticks[1].attr("transform"), Some("translate(50,0)"));
}

#[test]
fn horizontal_lines_extend_right_by_size() {
    let grid = GridLine::new(
        GridLineConfig::new(GridOrientation::Horizontal)
            .with_ticks(3)
            .with_size(300.0)
            .with_transform("translate(30,10)")
            .with_attr("class", "grid")
            .with_disable_animation(true),
        scale(100.0),
        ManualFrameClock::default(),
    );

    let root = grid.render();
    assert_eq!(root.attr("transform"), Some("translate(30,10)"));
    assert!(root.has_class("grid"));
    let lines = root.select_all("line");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.attr("x2") == Some("300")));
    let ticks = root.select_all("g.tick");
    assert_eq!(ticks[2].attr("transform"), Some("translate(0,100)"));
}

#[test]
fn lines_fade_in_unless_animation_is_disabled() {
    let config = GridLineConfig::new(GridOrientation::Vertical).with_ticks(5);
    let mut animated = GridLine::new(config.clone(), scale(200.0), ManualFrameClock::default());
    let opacities = |grid: &GridLine| -> Vec<Option<f64>> {
        grid.render()
            .select_all("g.tick")
            .into_iter()
            .map(|tick| tick.number("opacity"))
            .collect()
    };

    assert!(opacities(&animated).iter().all(|opacity| *opacity == Some(0.0)));
    animated.on_frame(Duration::from_millis(16));
    animated.on_frame(Duration::from_millis(141));
    assert!(opacities(&animated).iter().all(|opacity| *opacity == Some(0.5)));
    animated.on_frame(Duration::from_millis(266));
    assert!(opacities(&animated).iter().all(|opacity| *opacity == Some(1.0)));
    assert!(!animated.needs_frame());

    let instant = GridLine::new(
        config.with_disable_animation(true),
        scale(200.0),
        ManualFrameClock::default(),
    );
    assert!(opacities(&instant).iter().all(|opacity| *opacity == Some(1.0)));
    assert_eq!(instant.clock().requested_total, 0);
}

#[test]
fn zero_ticks_render_an_empty_group() {
    let grid = GridLine::new(GridLineConfig::default(), scale(200.0), ManualFrameClock::default());
    let root = grid.render();
    assert_eq!(root.tag, "g");
    assert!(root.children.is_empty());
    assert!(grid.ticks().is_empty());
}

#[test]
fn config_parses_orientation_from_type_field() {
    let config = GridLineConfig::from_json_str(r#"{"type":"horizontal","ticks":4,"size":80}"#)
        .expect("config");
    assert_eq!(config.orientation, GridOrientation::Horizontal);
    assert_eq!(config.ticks, 4);
    assert_eq!(config.size, 80.0);
    assert!(!config.disable_animation);
}

#[test]
fn unmount_cancels_the_pending_fade() {
    let mut grid = GridLine::new(
        GridLineConfig::new(GridOrientation::Vertical).with_ticks(2),
        scale(200.0),
        ManualFrameClock::default(),
    );
    assert!(grid.clock().has_pending_frame());

    grid.unmount();
    assert!(!grid.clock().has_pending_frame());
    assert_eq!(grid.clock().canceled_total, 1);
}
