use crate::{Error, ThisOrThat};

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
}

/// Splits `"<a> <b>"` into two floats. `what` names the coordinate type in
/// the error message.
pub(crate) fn parse_pair(value: &str, what: &str) -> Result<(f64, f64), Error> {
    let mut pieces = value.split_whitespace();

    let mut next = |axis: &str| {
        pieces
            .next()
            .ok_or_else(|| Error::Parse(format!("{what} `{value}` is missing its {axis} value")))
            .and_then(|piece| {
                piece
                    .parse::<f64>()
                    .map_err(|e| Error::Parse(format!("{what} {axis} `{piece}`: {e}")))
            })
    };

    let first = next("first")?;
    let second = next("second")?;

    if pieces.next().is_some() {
        return Err(Error::Parse(format!("{what} `{value}` has trailing values")));
    }

    Ok((first, second))
}

pub(crate) trait GeoMath {
    fn is_zero(&self) -> bool;
    fn eatanhe(&self, es: Self) -> Self;
    fn taupf(&self, es: Self) -> Self;
    fn tauf(&self, es: Self) -> Self;
}

impl GeoMath for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < f64::EPSILON
    }

    /// `e * atanh(e * x)`, continued to `-e * atan(e * x)` for prolate
    /// ellipsoids where `es` is negative.
    fn eatanhe(&self, es: f64) -> f64 {
        (es > 0.).ternary_lazy(
            || es * (es * *self).atanh(),
            || -es * (es * *self).atan(),
        )
    }

    /// tan(chi) from tan(phi), chi being the conformal latitude.
    fn taupf(&self, es: f64) -> f64 {
        let tau1 = 1.0_f64.hypot(*self);
        let sig = (*self / tau1).eatanhe(es).sinh();

        1.0_f64.hypot(sig) * *self - sig * tau1
    }

    /// Inverse of [`GeoMath::taupf`] by Newton's method.
    #[allow(clippy::similar_names)]
    fn tauf(&self, es: f64) -> f64 {
        let numit = 5;
        let tol = f64::EPSILON.sqrt() / 10.0;
        let taumax = 2.0 / f64::EPSILON.sqrt();

        let e2m = 1.0 - es.powi(2);
        let mut tau = if self.abs() > 70.0 {
            self * 1_f64.eatanhe(es).exp()
        } else {
            self / e2m
        };

        // Close enough to the pole that the series has converged
        if tau.abs() >= taumax {
            return tau;
        }

        let stol = tol * self.abs().max(1.0);
        for _ in 0..numit {
            let taupa = tau.taupf(es);
            let dtau = (self - taupa) * (1.0 + e2m * tau.powi(2))
                / (e2m * 1.0_f64.hypot(tau) * 1.0_f64.hypot(taupa));
            tau += dtau;
            if dtau.abs() < stol {
                break;
            }
        }
        tau
    }
}
