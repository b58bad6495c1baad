//! Ordinary least-squares trend fit with slope significance testing.
//!
//! The fit regresses observed values on the year. Missing observations are
//! excluded from the fit, but the fitted line is evaluated for every year of
//! the input range, so the output stays aligned with the source table.
//!
//! The two-sided p-value for the null hypothesis `slope = 0` uses the
//! standard t statistic on the regression slope with `n - 2` degrees of
//! freedom. No crate in our stack ships the Student-t distribution, so the
//! tail probability is computed here from the regularized incomplete beta
//! function (continued-fraction evaluation, Lanczos log-gamma).

/// Result of a least-squares trend fit.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    /// Slope scaled to anomaly units per decade.
    pub warming_rate_per_decade: f64,
    /// Fitted value for every year of the input range, in year order.
    pub trend_line: Vec<f64>,
}

impl TrendResult {
    fn zeroed() -> Self {
        TrendResult {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            p_value: 0.0,
            warming_rate_per_decade: 0.0,
            trend_line: Vec::new(),
        }
    }
}

/// Fits a linear trend of `values` on `years`.
///
/// Only years with a present value enter the fit. An all-absent series
/// produces a zeroed result with an empty trend line rather than an error.
pub fn fit_trend(years: &[i32], values: &[Option<f64>]) -> TrendResult {
    let points: Vec<(f64, f64)> = years
        .iter()
        .zip(values)
        .filter_map(|(year, value)| value.map(|v| (f64::from(*year), v)))
        .collect();

    if points.is_empty() {
        return TrendResult::zeroed();
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for (x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    // A single distinct year gives the fit no direction; report a flat line
    // through the mean.
    let (slope, intercept) = if ss_xx == 0.0 {
        (0.0, mean_y)
    } else {
        let slope = ss_xy / ss_xx;
        (slope, mean_y - slope * mean_x)
    };

    let (r_squared, p_value) = if points.len() <= 2 || ss_xx == 0.0 {
        (0.0, 0.0)
    } else {
        let r = if ss_yy == 0.0 {
            0.0
        } else {
            (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
        };
        let df = n - 2.0;
        let p_value = if (1.0 - r * r) <= f64::EPSILON {
            0.0
        } else {
            let t = r * (df / (1.0 - r * r)).sqrt();
            two_sided_p_value(t, df)
        };
        (r * r, p_value)
    };

    let trend_line = years
        .iter()
        .map(|year| slope * f64::from(*year) + intercept)
        .collect();

    TrendResult {
        slope,
        intercept,
        r_squared,
        p_value,
        warming_rate_per_decade: slope * 10.0,
        trend_line,
    }
}

/// Two-sided tail probability of the Student-t distribution.
///
/// `P(|T| > t) = I_{df / (df + t^2)}(df / 2, 1 / 2)` for `df` degrees of
/// freedom.
fn two_sided_p_value(t: f64, df: f64) -> f64 {
    incomplete_beta(df / 2.0, 0.5, df / (df + t * t))
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front =
        (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();

    // The continued fraction converges fast only below the distribution's
    // mean; above it, use the symmetry I_x(a, b) = 1 - I_{1-x}(b, a).
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Continued-fraction expansion of the incomplete beta function, evaluated
/// with the modified Lentz algorithm.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 200;
    const EPSILON: f64 = 1.0e-14;
    const TINY: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let numerator = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + numerator * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + numerator / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let numerator = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + numerator * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + numerator / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }

    h
}

/// Natural log of the gamma function (Lanczos approximation).
fn ln_gamma(x: f64) -> f64 {
    const COEFFICIENTS: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let mut denominator = x;
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut series = 1.000_000_000_190_015;
    for coefficient in COEFFICIENTS {
        denominator += 1.0;
        series += coefficient / denominator;
    }

    -tmp + (2.506_628_274_631_000_5 * series / x).ln()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn should_fit_perfectly_linear_series() {
        let years: Vec<i32> = (2000..=2010).collect();
        let values: Vec<Option<f64>> = years
            .iter()
            .map(|y| Some(2.0 * f64::from(*y) - 4000.0))
            .collect();

        let result = fit_trend(&years, &values);

        assert!((result.slope - 2.0).abs() < TOLERANCE);
        assert!((result.intercept + 4000.0).abs() < 1e-6);
        assert!((result.r_squared - 1.0).abs() < TOLERANCE);
        assert!((result.warming_rate_per_decade - 20.0).abs() < TOLERANCE);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn should_zero_out_all_absent_series() {
        let years = [2000, 2001, 2002];
        let values = [None, None, None];

        let result = fit_trend(&years, &values);

        assert_eq!(result, TrendResult::zeroed());
    }

    #[test]
    fn should_span_absent_years_in_trend_line() {
        let years = [2000, 2001, 2002, 2003];
        let values = [Some(0.0), None, Some(2.0), Some(3.0)];

        let result = fit_trend(&years, &values);

        assert_eq!(result.trend_line.len(), 4);
        // The fit is exact on the present points, so the gap year lands on
        // the same line.
        assert!((result.trend_line[1] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn should_degenerate_gracefully_with_two_points() {
        let years = [2000, 2001];
        let values = [Some(1.0), Some(2.0)];

        let result = fit_trend(&years, &values);

        assert!((result.slope - 1.0).abs() < TOLERANCE);
        assert_eq!(result.r_squared, 0.0);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn should_report_flat_trend_for_constant_series() {
        let years = [2000, 2001, 2002, 2003];
        let values = [Some(0.5); 4];

        let result = fit_trend(&years, &values);

        assert_eq!(result.slope, 0.0);
        assert!((result.intercept - 0.5).abs() < TOLERANCE);
        assert_eq!(result.r_squared, 0.0);
        // No evidence at all against a zero slope.
        assert!((result.p_value - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn should_match_uniform_incomplete_beta() {
        // I_x(1, 1) is the uniform CDF.
        assert!((incomplete_beta(1.0, 1.0, 0.25) - 0.25).abs() < 1e-12);
        assert!((incomplete_beta(1.0, 1.0, 0.75) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn should_match_arcsine_incomplete_beta() {
        // I_x(1/2, 1/2) = (2 / pi) * asin(sqrt(x)).
        let expected = 2.0 / std::f64::consts::PI * 0.3_f64.sqrt().asin();
        assert!((incomplete_beta(0.5, 0.5, 0.3) - expected).abs() < 1e-10);
    }

    #[test]
    fn should_match_known_gamma_values() {
        // ln Γ(1) = 0, ln Γ(5) = ln 24.
        assert!(ln_gamma(1.0).abs() < 1e-10);
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn should_match_closed_form_t_tails() {
        // df = 1 is the Cauchy distribution: P(|T| > 1) = 1/2.
        assert!((two_sided_p_value(1.0, 1.0) - 0.5).abs() < 1e-10);

        // df = 2 has CDF 1/2 + t / (2 * sqrt(2 + t^2)):
        // P(|T| > sqrt(2)) = 1 - 1/sqrt(2).
        let expected = 1.0 - 1.0 / 2.0_f64.sqrt();
        assert!((two_sided_p_value(2.0_f64.sqrt(), 2.0) - expected).abs() < 1e-10);
    }

    #[test]
    fn should_weaken_p_value_with_noise() {
        let years: Vec<i32> = (2000..=2009).collect();
        let clean: Vec<Option<f64>> = years
            .iter()
            .map(|y| Some(0.02 * f64::from(*y - 2000)))
            .collect();
        let noisy = [
            Some(0.05),
            Some(-0.02),
            Some(0.09),
            Some(0.01),
            Some(0.12),
            Some(0.03),
            Some(0.08),
            Some(0.15),
            Some(0.06),
            Some(0.18),
        ];

        let clean_fit = fit_trend(&years, &clean);
        let noisy_fit = fit_trend(&years, &noisy);

        assert!(clean_fit.p_value < noisy_fit.p_value);
        assert!(noisy_fit.p_value > 0.0 && noisy_fit.p_value < 1.0);
    }
}
