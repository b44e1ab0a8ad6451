use vecplot::config::AxisExtent;
use vecplot::ticks::{Axis, axis_lines, tick_values, ticks};
use vecplot::{Point, Transform};

#[test]
fn tick_count_and_positions() {
    for (h, s) in [(100.0, 25.0), (150.0, 25.0), (150.0, 10.0), (50.0, 10.0)] {
        let values = tick_values(h, s);
        let expected = (2.0 * h / s).floor() as usize - 1;
        assert_eq!(values.len(), expected, "H={h} S={s}");
        for v in &values {
            assert!(*v >= -h && *v < h);
            assert_ne!(*v, 0.0);
            assert_eq!((v / s).fract(), 0.0, "{v} is a multiple of {s}");
        }
    }
}

#[test]
fn ticks_start_at_negative_extent_and_skip_zero() {
    assert_eq!(
        tick_values(100.0, 25.0),
        vec![-100.0, -75.0, -50.0, -25.0, 25.0, 50.0, 75.0]
    );
}

#[test]
fn non_multiple_extent_uses_round_positions() {
    assert_eq!(tick_values(60.0, 25.0), vec![-50.0, -25.0, 25.0, 50.0]);
}

#[test]
fn tick_marks_and_labels_sit_outside_axis() {
    let all = ticks(Point::new(50.0, 20.0), 10.0);
    let x: Vec<_> = all.iter().filter(|t| t.axis == Axis::X).collect();
    let y: Vec<_> = all.iter().filter(|t| t.axis == Axis::Y).collect();
    assert_eq!(x.len(), 9);
    assert_eq!(y.len(), 3);

    let t = x[0];
    assert_eq!(t.value, -50.0);
    assert_eq!(t.mark, (Point::new(-50.0, -1.0), Point::new(-50.0, 0.0)));
    assert_eq!(t.label_anchor, Point::new(-50.0, -2.0));
    assert_eq!(t.label, "-50");

    let t = y[2];
    assert_eq!(t.value, 10.0);
    assert_eq!(t.mark, (Point::new(-1.0, 10.0), Point::new(0.0, 10.0)));
    assert_eq!(t.label_anchor, Point::new(-2.0, 10.0));
}

#[test]
fn viewport_axes_span_the_half_extent() {
    let t = Transform::new(Point::new(100.0, 80.0), 2.0);
    let [x, y] = axis_lines(&t, AxisExtent::Viewport);
    assert_eq!(x, (Point::new(-100.0, 0.0), Point::new(100.0, 0.0)));
    assert_eq!(y, (Point::new(0.0, -80.0), Point::new(0.0, 80.0)));
}

#[test]
fn overscan_axes_span_minus_one_to_two_translate_in_device_space() {
    let t = Transform::new(Point::new(100.0, 80.0), 1.0);
    let [x, y] = axis_lines(&t, AxisExtent::Overscan);
    assert_eq!(t.apply(x.0), Point::new(-100.0, 80.0));
    assert_eq!(t.apply(x.1), Point::new(200.0, 80.0));
    assert_eq!(t.apply(y.0), Point::new(100.0, -80.0));
    assert_eq!(t.apply(y.1), Point::new(100.0, 160.0));
}
