//! Stability certificate derived from the service's formula
//!
//! The formula is a LaTeX quadratic form `V = a·e² + b·e·ė + c·ė²`. Two views
//! are derived from it: a plain-text rendering and a sampled surface built
//! from the three coefficients.

use once_cell::sync::Lazy;
use regex::Regex;

/// Coefficient of `e^2`
static E_SQUARED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d*\.?\d+)\s*\\cdot\s*e\^2").unwrap());

/// Coefficient of `e \cdot \dot{e}`
static CROSS_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-]?\d*\.?\d+)\s*\\cdot\s*e\s*\\cdot\s*\\dot\{\{?e\}?\}").unwrap()
});

/// Coefficient of `\dot{e}^2`
static DE_SQUARED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d*\.?\d+)\s*\\cdot\s*\\dot\{\{?e\}?\}\^2").unwrap());

static DOT_E: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\dot\{\{?e\}?\}").unwrap());

static TEXT_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:text|mathrm)\{([^}]*)\}").unwrap());

/// Grid resolution of the certificate surface
pub const SURFACE_RESOLUTION: usize = 45;

/// Head-room above the surface maximum
const Z_HEADROOM: f64 = 1.05;

fn coefficient(pattern: &Regex, formula: &str) -> f64 {
    pattern
        .captures(formula)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// `a`, `b`, `c` of the quadratic form; missing terms are zero
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadraticCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticCoefficients {
    pub fn parse(formula: &str) -> Self {
        Self {
            a: coefficient(&E_SQUARED, formula),
            b: coefficient(&CROSS_TERM, formula),
            c: coefficient(&DE_SQUARED, formula),
        }
    }

    pub fn evaluate(&self, e: f64, de: f64) -> f64 {
        self.a * e * e + self.b * e * de + self.c * de * de
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `V` sampled over `e, ė ∈ [-1, 1]`, shifted so its minimum is zero
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub e: Vec<f64>,
    pub de: Vec<f64>,
    /// `values[j][i]` is the shifted `V(e[i], de[j])`
    pub values: Vec<Vec<f64>>,
    pub z_max: f64,
}

impl Surface {
    pub fn sample(coefficients: &QuadraticCoefficients, resolution: usize) -> Self {
        let e = linspace(-1.0, 1.0, resolution);
        let de = linspace(-1.0, 1.0, resolution);

        let raw: Vec<Vec<f64>> = de
            .iter()
            .map(|&y| e.iter().map(|&x| coefficients.evaluate(x, y)).collect())
            .collect();
        let min = raw
            .iter()
            .flatten()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let values: Vec<Vec<f64>> = raw
            .into_iter()
            .map(|row| row.into_iter().map(|v| v - min).collect())
            .collect();
        let max = values.iter().flatten().copied().fold(0.0, f64::max);

        Self {
            e,
            de,
            values,
            z_max: max * Z_HEADROOM,
        }
    }

    pub fn resolution(&self) -> usize {
        self.e.len()
    }
}

/// Plain-text form of the formula; `V = N/A` when empty
pub fn render_formula_text(formula: &str) -> String {
    let formula = formula.trim();
    if formula.is_empty() {
        return "V = N/A".to_string();
    }

    let text = TEXT_COMMAND.replace_all(formula, "$1");
    let text = DOT_E.replace_all(&text, "ė");
    let text = text
        .replace("\\cdot", "·")
        .replace("\\left", "")
        .replace("\\right", "")
        .replace("\\,", " ")
        .replace("^2", "²")
        .replace(['$', '{', '}'], "");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Everything the success view shows
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub formula: String,
    pub text: String,
    pub coefficients: QuadraticCoefficients,
    pub surface: Surface,
}

impl Certificate {
    pub fn from_formula(formula: &str) -> Self {
        let coefficients = QuadraticCoefficients::parse(formula);
        Self {
            formula: formula.to_string(),
            text: render_formula_text(formula),
            coefficients,
            surface: Surface::sample(&coefficients, SURFACE_RESOLUTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMULA: &str = r"V = 1.25 \cdot e^2 + 0.5 \cdot e \cdot \dot{e} + 2 \cdot \dot{e}^2";

    #[test]
    fn test_parse_coefficients() {
        let coefficients = QuadraticCoefficients::parse(FORMULA);
        assert_eq!(
            coefficients,
            QuadraticCoefficients {
                a: 1.25,
                b: 0.5,
                c: 2.0
            }
        );
    }

    #[test]
    fn test_parse_signed_and_double_braced() {
        let formula = r"V = 3 \cdot e^2 -0.75 \cdot e \cdot \dot{{e}} + .5 \cdot \dot{{e}}^2";
        let coefficients = QuadraticCoefficients::parse(formula);
        assert_eq!(coefficients.a, 3.0);
        assert_eq!(coefficients.b, -0.75);
        assert_eq!(coefficients.c, 0.5);
    }

    #[test]
    fn test_garbage_gives_zeros() {
        assert_eq!(
            QuadraticCoefficients::parse("no formula here"),
            QuadraticCoefficients::default()
        );
        assert_eq!(QuadraticCoefficients::parse(""), QuadraticCoefficients::default());
    }

    #[test]
    fn test_surface_shape_and_minimum() {
        let surface = Surface::sample(&QuadraticCoefficients::parse(FORMULA), SURFACE_RESOLUTION);
        assert_eq!(surface.resolution(), 45);
        assert_eq!(surface.values.len(), 45);
        assert_eq!(surface.e[0], -1.0);
        assert!((surface.e[44] - 1.0).abs() < 1e-12);

        let min = surface.values.iter().flatten().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0.0);
        // Corner (1, 1): 1.25 + 0.5 + 2 = 3.75, minimum 0 at the origin
        assert!((surface.values[44][44] - 3.75).abs() < 1e-9);
        assert!((surface.z_max - 3.75 * 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_flat_surface() {
        let surface = Surface::sample(&QuadraticCoefficients::default(), 5);
        assert!(surface.values.iter().flatten().all(|v| *v == 0.0));
        assert_eq!(surface.z_max, 0.0);
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_formula_text(FORMULA),
            "V = 1.25 · e² + 0.5 · e · ė + 2 · ė²"
        );
        assert_eq!(render_formula_text("  "), "V = N/A");
        assert_eq!(render_formula_text(r"V = \text{N/A}"), "V = N/A");
    }

    #[test]
    fn test_certificate_from_formula() {
        let certificate = Certificate::from_formula(FORMULA);
        assert_eq!(certificate.coefficients.c, 2.0);
        assert_eq!(certificate.surface.resolution(), SURFACE_RESOLUTION);
        assert!(certificate.text.starts_with("V = 1.25"));
    }
}
