use vecplot::render::canvas::{CanvasContext, CanvasRenderer};
use vecplot::render::recording::{CanvasOp, RecordingContext};
use vecplot::render::{TextAlign, TextBaseline, render};
use vecplot::{DashStyle, LineCap, Point, RenderConfig, RenderError, Transform, Vector, VectorCollection};

fn single_v1() -> VectorCollection {
    let mut v = VectorCollection::new();
    v.insert(
        "V1".into(),
        Vector::new("V1", Point::new(0.0, 0.0), Point::new(10.0, 20.0)).with_color("red"),
    );
    v
}

fn transform() -> Transform {
    Transform::new(Point::new(100.0, 100.0), 1.0)
}

fn run(vectors: &VectorCollection, t: &Transform, cfg: &RenderConfig) -> RecordingContext {
    let mut ctx = RecordingContext::new(200.0, 200.0);
    render(&mut CanvasRenderer::new(&mut ctx), vectors, t, cfg).unwrap();
    ctx
}

#[test]
fn end_to_end_single_vector() {
    let ctx = run(&single_v1(), &transform(), &RenderConfig::default());

    let line = ctx.strokes().last().unwrap();
    assert_eq!(
        line.subpaths,
        vec![vec![Point::new(100.0, 100.0), Point::new(110.0, 80.0)]]
    );
    assert_eq!(line.color, "red");
    assert_eq!(line.width, 1.0);
    assert!(line.dash.is_empty());
    assert_eq!(line.cap, LineCap::Round);

    let label = ctx.texts().last().unwrap();
    assert_eq!(label.text, "V1");
    assert_eq!(label.at, Point::new(110.0, 80.0));
    assert_eq!(label.align, TextAlign::Left);
    assert_eq!(label.baseline, TextBaseline::Bottom);
    assert_eq!(label.color, "red");
    assert_eq!(label.font, "13px sans-serif");
}

#[test]
fn pass_starts_with_clear_and_balances_save_restore() {
    let ctx = run(&single_v1(), &transform(), &RenderConfig::default());
    let ops = ctx.ops();
    assert_eq!(
        ops[0],
        CanvasOp::ClearRect {
            x: 0.0,
            y: 0.0,
            w: 200.0,
            h: 200.0
        }
    );
    assert_eq!(ops[1], CanvasOp::Save);
    assert_eq!(ops[2], CanvasOp::Translate { x: 100.0, y: 100.0 });
    assert_eq!(ops[3], CanvasOp::Scale { x: 1.0, y: 1.0 });
    assert_eq!(ops.last(), Some(&CanvasOp::Restore));
    assert_eq!(ctx.state().save_depth(), 0);
}

#[test]
fn empty_collection_draws_axis_and_all_ticks_only() {
    let ctx = run(&VectorCollection::new(), &transform(), &RenderConfig::default());
    // 7 ticks per axis at step 25 over half-extent 100
    assert_eq!(ctx.strokes().count(), 2 + 14);
    assert_eq!(ctx.texts().count(), 14);
    assert!(ctx.strokes().all(|s| s.color == "gray"));
    assert!(ctx.texts().all(|t| t.color == "gray"));

    let labels: Vec<&str> = ctx.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(
        &labels[..7],
        &["-100", "-75", "-50", "-25", "25", "50", "75"]
    );
}

#[test]
fn tick_step_is_configurable() {
    let cfg = RenderConfig::default().with_tick_step(10.0);
    let ctx = run(&VectorCollection::new(), &transform(), &cfg);
    assert_eq!(ctx.texts().count(), 2 * 19);
}

#[test]
fn excluded_keys_draw_line_without_label() {
    let mut vectors = single_v1();
    vectors.insert(
        "L1".into(),
        Vector::new("L1", Point::ORIGIN, Point::new(-30.0, 10.0)),
    );
    let cfg = RenderConfig::default().exclude_labels(["L1", "L2", "L3"]);
    let ctx = run(&vectors, &transform(), &cfg);

    let vector_strokes: Vec<_> = ctx.strokes().filter(|s| s.color != "gray").collect();
    assert_eq!(vector_strokes.len(), 2);
    assert_eq!(
        vector_strokes[1].subpaths[0],
        vec![Point::new(100.0, 100.0), Point::new(70.0, 90.0)]
    );
    let vector_texts: Vec<_> = ctx.texts().filter(|t| t.color != "gray").collect();
    assert_eq!(vector_texts.len(), 1);
    assert_eq!(vector_texts[0].text, "V1");
}

#[test]
fn draw_order_follows_insertion_order() {
    let mut vectors = VectorCollection::new();
    for key in ["Vc", "Va", "Vb"] {
        vectors.insert(
            key.into(),
            Vector::new(key, Point::ORIGIN, Point::new(1.0, 1.0)).with_color("blue"),
        );
    }
    let ctx = run(&vectors, &transform(), &RenderConfig::default());
    let order: Vec<&str> = ctx
        .texts()
        .filter(|t| t.color == "blue")
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(order, ["Vc", "Va", "Vb"]);
}

#[test]
fn every_text_call_sets_all_text_properties() {
    let ctx = run(&single_v1(), &transform(), &RenderConfig::default());
    let ops = ctx.ops();
    for (i, op) in ops.iter().enumerate() {
        if let CanvasOp::FillText(_) = op {
            assert!(matches!(ops[i - 4], CanvasOp::SetTextAlign { .. }));
            assert!(matches!(ops[i - 3], CanvasOp::SetTextBaseline { .. }));
            assert!(matches!(ops[i - 2], CanvasOp::SetFont { .. }));
            assert!(matches!(ops[i - 1], CanvasOp::SetFillStyle { .. }));
        }
        if let CanvasOp::Stroke(_) = op {
            assert!(matches!(ops[i - 3], CanvasOp::SetStrokeStyle { .. }));
            assert!(matches!(ops[i - 2], CanvasOp::SetLineWidth { .. }));
            assert!(matches!(ops[i - 1], CanvasOp::SetLineCap { .. }));
        }
    }
}

#[test]
fn text_alignment_follows_anchor_quadrant() {
    assert_eq!(TextAlign::for_anchor(5.0), TextAlign::Left);
    assert_eq!(TextAlign::for_anchor(-5.0), TextAlign::Right);
    assert_eq!(TextAlign::for_anchor(0.0), TextAlign::Right);

    assert_eq!(TextBaseline::for_anchor(5.0, true), TextBaseline::Bottom);
    assert_eq!(TextBaseline::for_anchor(-5.0, true), TextBaseline::Top);
    assert_eq!(TextBaseline::for_anchor(0.0, true), TextBaseline::Top);
    assert_eq!(TextBaseline::for_anchor(5.0, false), TextBaseline::Top);
    assert_eq!(TextBaseline::for_anchor(-5.0, false), TextBaseline::Bottom);
}

#[test]
fn without_inversion_y_grows_downward() {
    let t = transform().with_invert_y(false);
    let ctx = run(&single_v1(), &t, &RenderConfig::default());
    let label = ctx.texts().last().unwrap();
    assert_eq!(label.at, Point::new(110.0, 120.0));
    assert_eq!(label.baseline, TextBaseline::Top);
}

#[test]
fn scale_applies_to_geometry_width_and_dash() {
    let mut vectors = VectorCollection::new();
    vectors.insert(
        "V1".into(),
        Vector::new("V1", Point::ORIGIN, Point::new(10.0, 20.0))
            .with_width(1.5)
            .with_dash(DashStyle::Dashed),
    );
    let ctx = run(&vectors, &transform().with_scale(2.0), &RenderConfig::default());
    let line = ctx.strokes().last().unwrap();
    assert_eq!(line.subpaths[0], vec![Point::new(100.0, 100.0), Point::new(120.0, 60.0)]);
    assert_eq!(line.width, 3.0);
    assert_eq!(line.dash, vec![8.0, 8.0]);
}

#[test]
fn malformed_input_fails_before_any_drawing() {
    let mut vectors = single_v1();
    vectors.insert(
        "bad".into(),
        Vector::new("bad", Point::ORIGIN, Point::new(f64::NAN, 1.0)),
    );
    let mut ctx = RecordingContext::new(200.0, 200.0);
    let err = render(
        &mut CanvasRenderer::new(&mut ctx),
        &vectors,
        &transform(),
        &RenderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::MalformedInput { ref key, .. } if key == "bad"));
    assert!(ctx.ops().is_empty());
}

#[test]
fn failed_pass_keeps_previous_frame() {
    let mut ctx = RecordingContext::new(200.0, 200.0);
    render(
        &mut CanvasRenderer::new(&mut ctx),
        &single_v1(),
        &transform(),
        &RenderConfig::default(),
    )
    .unwrap();
    let before = ctx.ops().to_vec();

    let mut vectors = single_v1();
    vectors.insert("L9".into(), Vector::new("  ", Point::ORIGIN, Point::ORIGIN));
    let err = render(
        &mut CanvasRenderer::new(&mut ctx),
        &vectors,
        &transform(),
        &RenderConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing label"));
    assert_eq!(ctx.ops(), before.as_slice());
}

#[test]
fn zero_sized_canvas_is_unavailable() {
    let mut ctx = RecordingContext::new(0.0, 150.0);
    let err = render(
        &mut CanvasRenderer::new(&mut ctx),
        &single_v1(),
        &transform(),
        &RenderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::SurfaceUnavailable(_)));
    assert!(ctx.ops().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let mut ctx = RecordingContext::new(200.0, 200.0);
    let cfg = RenderConfig::default().with_tick_step(0.0);
    let err = render(&mut CanvasRenderer::new(&mut ctx), &single_v1(), &transform(), &cfg)
        .unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
}

#[test]
fn op_log_serializes_to_tagged_json() {
    let ctx = run(&single_v1(), &transform(), &RenderConfig::default());
    let v: serde_json::Value = serde_json::from_str(&ctx.to_json().unwrap()).unwrap();
    let ops = v.as_array().unwrap();
    assert_eq!(ops[0]["op"], "clear_rect");
    let last_text = ops.iter().rev().find(|o| o["op"] == "fill_text").unwrap();
    assert_eq!(last_text["text"], "V1");
    assert_eq!(last_text["align"], "left");
    assert_eq!(last_text["baseline"], "bottom");
}

/// Context whose next `fill_text` fails, as a bitmap backend does without a font.
struct FailingText {
    state: vecplot::render::canvas::CanvasState,
    fail_next_text: bool,
    strokes: Vec<Vec<Vec<Point>>>,
}

impl CanvasContext for FailingText {
    fn state(&self) -> &vecplot::render::canvas::CanvasState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut vecplot::render::canvas::CanvasState {
        &mut self.state
    }

    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) -> Result<(), RenderError> {
        self.strokes.clear();
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), RenderError> {
        self.strokes.push(self.state.subpaths().to_vec());
        Ok(())
    }

    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64) -> Result<(), RenderError> {
        if std::mem::take(&mut self.fail_next_text) {
            return Err(RenderError::Backend("font missing".into()));
        }
        Ok(())
    }
}

#[test]
fn backend_failure_mid_pass_restores_context() {
    let mut ctx = FailingText {
        state: vecplot::render::canvas::CanvasState::new(200.0, 200.0),
        fail_next_text: true,
        strokes: Vec::new(),
    };
    let cfg = RenderConfig::default();

    let err = render(&mut CanvasRenderer::new(&mut ctx), &single_v1(), &transform(), &cfg)
        .unwrap_err();
    assert!(matches!(err, RenderError::Backend(_)));
    assert_eq!(ctx.state().save_depth(), 0);

    render(&mut CanvasRenderer::new(&mut ctx), &single_v1(), &transform(), &cfg).unwrap();
    assert_eq!(ctx.state().save_depth(), 0);
    assert_eq!(
        ctx.strokes.last().unwrap(),
        &vec![vec![Point::new(100.0, 100.0), Point::new(110.0, 80.0)]]
    );
}

#[test]
fn tiny_tick_step_is_rejected_before_drawing() {
    let mut ctx = RecordingContext::new(300.0, 300.0);
    let t = Transform::centered(300.0, 300.0);
    let cfg = RenderConfig::default().with_tick_step(1e-9);
    let err = render(&mut CanvasRenderer::new(&mut ctx), &single_v1(), &t, &cfg).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(ref m) if m.contains("ticks per axis")));
    assert!(ctx.ops().is_empty());

    // a fine but bounded step still renders
    let cfg = RenderConfig::default().with_tick_step(0.5);
    render(&mut CanvasRenderer::new(&mut ctx), &single_v1(), &t, &cfg).unwrap();
    assert_eq!(ctx.texts().count(), 2 * 599 + 1);
}
