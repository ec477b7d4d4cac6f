//! Multi-value sliders, exponent sliders and choice widgets.

use std::ops::RangeInclusive;

use egui::emath::Numeric;
use egui::{ComboBox, DragValue, Slider, Ui};
use ps_utils_core::{Choice, ChoiceMap};

const DRAG_WIDTH: f32 = 100.0;
const INPUT_WIDTH: f32 = 170.0;
const EXP_WIDTH: f32 = 100.0;
const MANTISSA_MAX: f64 = 9.99;

/// `n` sliders side by side, one per entry of `values` (1 to 4 entries).
///
/// # Panics
/// Panics if `values` is empty or has more than 4 entries.
pub fn slider_n<N: Numeric>(
    ui: &mut Ui,
    name: &str,
    values: &mut [N],
    range: RangeInclusive<N>,
) -> bool {
    assert!(
        (1..=4).contains(&values.len()),
        "slider_n takes 1 to 4 components!"
    );
    let count = values.len() as f32;
    ui.push_id(name, |ui| {
        ui.horizontal(|ui| {
            let spacing = ui.spacing().item_spacing.x;
            let label_width = ui.spacing().interact_size.x;
            let width = ((ui.available_width() - label_width) / count - spacing).max(24.0);
            ui.spacing_mut().slider_width = width;

            let mut changed = false;
            for (i, value) in values.iter_mut().enumerate() {
                ui.push_id(i, |ui| {
                    changed |= ui
                        .add(Slider::new(value, range.clone()).show_value(true))
                        .changed();
                });
            }
            ui.label(name);
            changed
        })
        .inner
    })
    .inner
}

/// `n` drag fields side by side (1 to 4 entries).
///
/// # Panics
/// Panics if `values` is empty or has more than 4 entries.
pub fn drag_n<N: Numeric>(
    ui: &mut Ui,
    name: &str,
    values: &mut [N],
    range: RangeInclusive<N>,
) -> bool {
    assert!(
        (1..=4).contains(&values.len()),
        "drag_n takes 1 to 4 components!"
    );
    ui.push_id(name, |ui| {
        ui.horizontal(|ui| {
            let mut changed = false;
            for (i, value) in values.iter_mut().enumerate() {
                changed |= ui
                    .add_sized(
                        [DRAG_WIDTH, ui.spacing().interact_size.y],
                        DragValue::new(value).range(range.clone()).prefix(format!("{i}: ")),
                    )
                    .changed();
            }
            ui.label(name);
            changed
        })
        .inner
    })
    .inner
}

/// Up to five integer inputs laid out `stride` per row, clamped to `range`.
///
/// # Panics
/// Panics if `values` is empty or has more than 5 entries.
pub fn input_n<N: Numeric>(
    ui: &mut Ui,
    name: &str,
    values: &mut [N],
    range: RangeInclusive<N>,
    step: f64,
    stride: usize,
) -> bool {
    assert!(
        (1..=5).contains(&values.len()),
        "input_n takes 1 to 5 components!"
    );
    let stride = stride.max(1);
    let (min, max) = (*range.start(), *range.end());

    ui.push_id(name, |ui| {
        let mut changed = false;
        ui.label(name);
        for (row, chunk) in values.chunks_mut(stride).enumerate() {
            ui.horizontal(|ui| {
                for (col, value) in chunk.iter_mut().enumerate() {
                    let response = ui.add_sized(
                        [INPUT_WIDTH, ui.spacing().interact_size.y],
                        DragValue::new(value)
                            .speed(step)
                            .prefix(format!("{}: ", row * stride + col)),
                    );
                    if response.changed() {
                        *value = clamp_numeric(*value, min, max);
                        changed = true;
                    }
                }
            });
        }
        changed
    })
    .inner
}

fn clamp_numeric<N: Numeric>(value: N, min: N, max: N) -> N {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Bounds of an [`exp_slider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpRange {
    pub min_exp: i32,
    pub max_exp: i32,
    pub min: f64,
    pub max: f64,
}

impl Default for ExpRange {
    fn default() -> Self {
        Self {
            min_exp: -5,
            max_exp: 5,
            min: 1e-5,
            max: 1e6,
        }
    }
}

/// Splits a positive value into a mantissa in `[1, 10)` and a decimal exponent.
///
/// Non-positive values split to `(value, 0)`.
pub fn split_exponent(value: f64) -> (f64, i32) {
    if value <= 0.0 || !value.is_finite() {
        return (value, 0);
    }
    let exp = value.log10().floor() as i32;
    (value / 10f64.powi(exp), exp)
}

/// Recombines a mantissa and exponent, clamped to `range`.
pub fn compose_exponent(mantissa: f64, exp: i32, range: &ExpRange) -> f64 {
    (mantissa * 10f64.powi(exp)).clamp(range.min, range.max)
}

/// A mantissa slider and an exponent slider editing `value` on a log scale.
pub fn exp_slider(ui: &mut Ui, name: &str, value: &mut f64, range: ExpRange) -> bool {
    let (mut mantissa, mut exp) = split_exponent(*value);
    mantissa = mantissa.clamp(1.0, MANTISSA_MAX);

    let changed = ui
        .push_id(name, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().slider_width = EXP_WIDTH;
                let rel = ui
                    .add(Slider::new(&mut mantissa, 1.0..=MANTISSA_MAX).max_decimals(2))
                    .changed();
                let ex = ui
                    .add(Slider::new(&mut exp, range.min_exp..=range.max_exp).prefix("e"))
                    .changed();
                ui.label(name);
                rel || ex
            })
            .inner
        })
        .inner;

    if changed {
        *value = compose_exponent(mantissa, exp, &range);
    }
    changed
}

/// Index slider over `choices` that displays the current label.
///
/// A `value` missing from `choices` is shown as the first entry.
pub fn choice_slider<T: PartialEq + Clone>(
    ui: &mut Ui,
    name: &str,
    value: &mut T,
    choices: &ChoiceMap<T>,
) -> bool {
    if choices.is_empty() {
        return false;
    }
    let mut index = choices.index_of(value).unwrap_or(0);
    let label = choices.label(index).unwrap_or_default().to_string();

    let changed = ui
        .add(
            Slider::new(&mut index, 0..=choices.len() - 1)
                .text(name)
                .custom_formatter(move |_, _| label.clone()),
        )
        .changed();

    if changed {
        if let Some(picked) = choices.get(index) {
            *value = picked.clone();
        }
    }
    changed
}

/// Combo box over `choices`.
pub fn choice_combo<T: PartialEq + Clone>(
    ui: &mut Ui,
    name: &str,
    value: &mut T,
    choices: &ChoiceMap<T>,
) -> bool {
    let current = choices.index_of(value);
    let mut picked = current;

    ComboBox::from_label(name)
        .selected_text(current.and_then(|i| choices.label(i)).unwrap_or("-"))
        .show_ui(ui, |ui| {
            for (i, label) in choices.labels().iter().enumerate() {
                ui.selectable_value(&mut picked, Some(i), label);
            }
        });

    match picked {
        Some(i) if picked != current => {
            if let Some(v) = choices.get(i) {
                *value = v.clone();
            }
            true
        }
        _ => false,
    }
}

/// [`choice_slider`] over an ordinal enum.
pub fn enum_slider<C: Choice>(ui: &mut Ui, name: &str, value: &mut C) -> bool {
    choice_slider(ui, name, value, &ChoiceMap::from(C::ALL))
}

/// [`choice_combo`] over an ordinal enum.
pub fn enum_combo<C: Choice>(ui: &mut Ui, name: &str, value: &mut C) -> bool {
    choice_combo(ui, name, value, &ChoiceMap::from(C::ALL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_utils_core::BrushMode;

    fn run_ui(mut add_contents: impl FnMut(&mut Ui)) {
        let ctx = egui::Context::default();
        ctx.begin_pass(egui::RawInput::default());
        egui::CentralPanel::default().show(&ctx, |ui| add_contents(ui));
        let _ = ctx.end_pass();
    }

    #[test]
    fn test_split_exponent() {
        let (m, e) = split_exponent(0.002);
        assert_eq!(e, -3);
        assert!((m - 2.0).abs() < 1e-9);

        let (m, e) = split_exponent(1500.0);
        assert_eq!(e, 3);
        assert!((m - 1.5).abs() < 1e-9);

        assert_eq!(split_exponent(0.0), (0.0, 0));
    }

    #[test]
    fn test_compose_exponent_clamps() {
        let range = ExpRange::default();
        assert!((compose_exponent(2.5, -2, &range) - 0.025).abs() < 1e-12);
        assert_eq!(compose_exponent(9.99, 5, &range), 999_000.0);
        assert_eq!(compose_exponent(1.0, -9, &range), range.min);

        let narrow = ExpRange {
            max: 10.0,
            ..ExpRange::default()
        };
        assert_eq!(compose_exponent(5.0, 3, &narrow), 10.0);
    }

    #[test]
    fn test_clamp_numeric() {
        assert_eq!(clamp_numeric(12, 0, 10), 10);
        assert_eq!(clamp_numeric(-1, 0, 10), 0);
        assert_eq!(clamp_numeric(4, 0, 10), 4);
    }

    #[test]
    fn test_widgets_report_unchanged_without_input() {
        let mut ints = [1, 2, 3];
        let mut five = [1, 2, 3, 4, 5];
        let mut lr = 0.001;
        let mut mode = BrushMode::Remove;
        let mut number = 8;
        let choices = ChoiceMap::new([2, 4, 8, 16]);

        run_ui(|ui| {
            assert!(!slider_n(ui, "slider", &mut ints, 0..=10));
            assert!(!drag_n(ui, "drag", &mut ints, 0..=10));
            assert!(!input_n(ui, "input", &mut five, 0..=10, 1.0, 2));
            assert!(!exp_slider(ui, "lr", &mut lr, ExpRange::default()));
            assert!(!enum_slider(ui, "mode", &mut mode));
            assert!(!enum_combo(ui, "mode##combo", &mut mode));
            assert!(!choice_slider(ui, "number", &mut number, &choices));
            assert!(!choice_combo(ui, "number##combo", &mut number, &choices));
        });

        assert_eq!(ints, [1, 2, 3]);
        assert_eq!(mode, BrushMode::Remove);
        assert_eq!(number, 8);
        assert!((lr - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "slider_n takes 1 to 4 components!")]
    fn test_slider_n_rejects_five_values() {
        let mut values = [0; 5];
        run_ui(|ui| {
            slider_n(ui, "too many", &mut values, 0..=1);
        });
    }
}
