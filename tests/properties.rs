//! Truncation properties checked against a deterministic measurer.
//!
//! Height is `ceil(graphemes / chars_per_row) * ROW_HEIGHT`, the grid a
//! monospace terminal without wrapping rules would produce.

use spark_ellipsis::oracle::attached_probe_count;
use spark_ellipsis::{
    compute_truncation, EllipsisPass, FixedSurface, TextStyle, TruncatePosition, TruncationOutcome, ROW_HEIGHT,
};
use unicode_segmentation::UnicodeSegmentation;

const POSITIONS: [TruncatePosition; 3] = [TruncatePosition::Start, TruncatePosition::Middle, TruncatePosition::End];

fn grid_height(text: &str, style: &TextStyle) -> f32 {
    let chars = text.graphemes(true).count();
    let per_row = (style.width as usize).max(1);
    chars.div_ceil(per_row) as f32 * style.line_height
}

fn run(width: f32, pass: &EllipsisPass<'_>) -> TruncationOutcome {
    let surface = FixedSurface::new(TextStyle::with_width(width));
    compute_truncation(&surface, &grid_height, pass)
        .ready()
        .expect("surface is attached")
}

/// Characters of the content kept in `text`.
fn retained(text: &str, marker: &str) -> usize {
    text.graphemes(true).count() - marker.graphemes(true).count()
}

#[test]
fn test_fit_invariant() {
    let content: String = ('a'..='z').cycle().take(500).collect();
    for position in POSITIONS {
        for rows in 1..4 {
            for width in [9.0, 13.0, 40.0] {
                let pass = EllipsisPass::new(&content).rows(rows).position(position).markup(" more");
                let out = run(width, &pass);
                assert!(out.overflow);

                let height = grid_height(&format!("{} more", out.text), &TextStyle::with_width(width));
                assert!(
                    out.budget.fits(height),
                    "{position:?} rows={rows} width={width}: {height} > {}",
                    out.budget.get()
                );
            }
        }
    }
}

#[test]
fn test_result_is_longest_fit() {
    // One more character than kept would overflow.
    let content = "A".repeat(200);
    for rows in 1..4 {
        let out = run(10.0, &EllipsisPass::new(&content).rows(rows));
        assert_eq!(out.text.len(), 10 * rows as usize);
    }
}

#[test]
fn test_fitting_content_untouched() {
    for position in POSITIONS {
        let out = run(80.0, &EllipsisPass::new("Short").rows(3).position(position));
        assert_eq!(out.text, "Short");
        assert!(!out.overflow);
        assert_eq!(out.probes, 1);
    }
}

#[test]
fn test_marker_placement() {
    let content = "A".repeat(1000);

    let end = run(20.0, &EllipsisPass::new(&content).position(TruncatePosition::End));
    assert!(end.text.ends_with("..."));
    assert!(!end.text.starts_with("..."));

    let start = run(20.0, &EllipsisPass::new(&content).position(TruncatePosition::Start));
    assert!(start.text.starts_with("..."));
    assert!(!start.text.ends_with("..."));

    let middle = run(20.0, &EllipsisPass::new(&content).position(TruncatePosition::Middle));
    let (head, tail) = middle.text.split_once("...").expect("marker present");
    assert!(!head.is_empty() && head.chars().all(|c| c == 'A'));
    assert!(!tail.is_empty() && tail.chars().all(|c| c == 'A'));
    assert!(middle.text.len() < 1000 + 3);
}

#[test]
fn test_middle_keeps_both_ends() {
    let content: String = ('a'..='z').chain('A'..='Z').collect::<String>().repeat(4);
    let out = run(16.0, &EllipsisPass::new(&content).position(TruncatePosition::Middle));
    assert_eq!(out.text.matches("...").count(), 1);
    assert!(out.text.starts_with("abc"));
    assert!(out.text.ends_with("XYZ"));
}

#[test]
fn test_more_rows_never_retain_less() {
    let content: String = "lorem ipsum dolor sit amet ".repeat(30);
    for position in POSITIONS {
        let mut previous = 0;
        for rows in 1..8 {
            let out = run(24.0, &EllipsisPass::new(&content).rows(rows).position(position));
            let kept = retained(&out.text, "...");
            assert!(kept >= previous, "{position:?}: rows {rows} kept {kept} < {previous}");
            previous = kept;
        }
    }
}

#[test]
fn test_narrower_box_never_retains_more() {
    let content = "The quick brown fox jumps over the lazy dog. ".repeat(20);
    for position in POSITIONS {
        let mut previous = usize::MAX;
        for width in [80.0, 60.0, 41.0, 30.0, 17.0, 9.0] {
            let out = run(width, &EllipsisPass::new(&content).rows(2).position(position));
            let kept = retained(&out.text, "...");
            assert!(kept <= previous, "{position:?}: width {width} kept {kept} > {previous}");
            previous = kept;
        }
    }
}

#[test]
fn test_repeated_runs_identical_and_leak_free() {
    let before = attached_probe_count();
    let content = "A".repeat(300);
    let pass = EllipsisPass::new(&content).rows(2).position(TruncatePosition::Middle);

    let first = run(20.0, &pass);
    let second = run(20.0, &pass);
    assert_eq!(first, second);

    let short = EllipsisPass::new("fits");
    assert_eq!(run(20.0, &short), run(20.0, &short));
    assert_eq!(attached_probe_count(), before);
}

#[test]
fn test_empty_content() {
    for position in POSITIONS {
        let out = run(10.0, &EllipsisPass::new("").rows(2).position(position).markup(" more"));
        assert_eq!(out.text, "");
        assert!(!out.overflow);
    }
}

#[test]
fn test_zero_rows_behaves_as_one() {
    let content = "A".repeat(100);
    let zero = run(10.0, &EllipsisPass::new(&content).rows(0));
    let one = run(10.0, &EllipsisPass::new(&content).rows(1));
    assert_eq!(zero.text, one.text);
    assert_eq!(zero.budget, one.budget);
}

#[test]
fn test_control_too_wide_returns_marker() {
    let content = "A".repeat(100);
    let control = "X".repeat(25);
    let out = run(10.0, &EllipsisPass::new(&content).markup(&control));
    assert_eq!(out.text, "...");
    assert!(out.overflow);
}

#[test]
fn test_budget_uses_row_height() {
    let out = run(10.0, &EllipsisPass::new(&"A".repeat(100)).rows(2));
    assert_eq!(out.budget.get(), (2.5 * ROW_HEIGHT).ceil() as u32);
}
