//! `IsdaCurve`: the piecewise-linear `r·t` curve of the ISDA standard model.
//!
//! A curve is a set of knots `t_i` with continuously-compounded zero rates
//! `r_i`. The product `rt(t) = r(t)·t` is interpolated linearly between
//! knots, so discount factors (and survival probabilities) are exponential
//! between knots and the instantaneous forward rate is piecewise constant:
//!
//! * before the first knot the zero rate is flat at `r_0`;
//! * between knots `rt` is linear;
//! * beyond the last knot the last segment's forward rate continues.
//!
//! A single-knot curve is therefore flat everywhere.

use isda_core::{
    ensure,
    errors::{Error, Result},
    Rate, Real, Time,
};

/// Knots and zero rates of an ISDA curve, with `rt_i = r_i·t_i` cached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsdaCurve {
    t: Vec<Time>,
    r: Vec<Rate>,
    rt: Vec<Real>,
}

impl IsdaCurve {
    /// Build a curve from knot times and zero rates.
    ///
    /// # Errors
    /// Precondition error if the slices are empty or of different lengths,
    /// the first time is negative, times are not strictly increasing or a rate
    /// is not finite.
    pub fn new(times: &[Time], rates: &[Rate]) -> Result<Self> {
        ensure!(!times.is_empty(), "a curve needs at least one knot");
        ensure!(
            times.len() == rates.len(),
            "{} knot times but {} zero rates",
            times.len(),
            rates.len()
        );
        ensure!(
            times[0] >= 0.0,
            "first knot time must be non-negative, got {}",
            times[0]
        );
        for (i, w) in times.windows(2).enumerate() {
            ensure!(
                w[1] > w[0],
                "knot times must be strictly increasing: t[{}] = {} but t[{}] = {}",
                i,
                w[0],
                i + 1,
                w[1]
            );
        }
        ensure!(
            rates.iter().all(|r| r.is_finite()),
            "zero rates must be finite"
        );
        let rt = times.iter().zip(rates).map(|(t, r)| t * r).collect();
        Ok(Self {
            t: times.to_vec(),
            r: rates.to_vec(),
            rt,
        })
    }

    /// A flat curve: one knot at `t = 1` with zero rate `rate`.
    pub fn flat(rate: Rate) -> Self {
        Self {
            t: vec![1.0],
            r: vec![rate],
            rt: vec![rate],
        }
    }

    /// Number of knots.
    pub fn num_knots(&self) -> usize {
        self.t.len()
    }

    /// Knot times.
    pub fn knot_times(&self) -> &[Time] {
        &self.t
    }

    /// Zero rates at the knots.
    pub fn zero_rates(&self) -> &[Rate] {
        &self.r
    }

    /// `r_i·t_i` at the knots.
    pub fn knot_rts(&self) -> &[Real] {
        &self.rt
    }

    /// The integrated rate `r(t)·t`.
    pub fn rt(&self, t: Time) -> Real {
        let n = self.t.len();
        if n == 1 || t <= self.t[0] {
            return self.r[0] * t;
        }
        // first knot at or after t; at least 1 because t > t[0]
        let idx = self.t.partition_point(|&k| k < t);
        if idx < n {
            if self.t[idx] == t {
                return self.rt[idx];
            }
            let (t0, t1) = (self.t[idx - 1], self.t[idx]);
            return ((t1 - t) * self.rt[idx - 1] + (t - t0) * self.rt[idx]) / (t1 - t0);
        }
        let (t0, t1) = (self.t[n - 2], self.t[n - 1]);
        self.rt[n - 1] + (t - t1) * (self.rt[n - 1] - self.rt[n - 2]) / (t1 - t0)
    }

    /// Continuously-compounded zero rate at `t` (`r_0` at or before the first
    /// knot).
    pub fn zero_rate(&self, t: Time) -> Rate {
        if self.t.len() == 1 || t <= self.t[0] {
            return self.r[0];
        }
        self.rt(t) / t
    }

    /// `exp(−rt(t))`.
    pub fn discount(&self, t: Time) -> Real {
        (-self.rt(t)).exp()
    }

    /// Instantaneous forward rate at `t`. At a knot the value of the segment
    /// ending there is returned.
    pub fn forward_rate(&self, t: Time) -> Rate {
        let n = self.t.len();
        if n == 1 || t <= self.t[0] {
            return self.r[0];
        }
        let idx = self.t.partition_point(|&k| k < t).min(n - 1);
        self.segment_forward(idx)
    }

    /// Forward rate on the segment ending at knot `i` (`r_0` for `i = 0`).
    fn segment_forward(&self, i: usize) -> Rate {
        if i == 0 {
            self.r[0]
        } else {
            (self.rt[i] - self.rt[i - 1]) / (self.t[i] - self.t[i - 1])
        }
    }

    /// Forward rates of every segment, starting with `[0, t_0]`.
    pub fn segment_forwards(&self) -> Vec<Rate> {
        (0..self.t.len()).map(|i| self.segment_forward(i)).collect()
    }

    /// Overwrite the zero rate of knot `index`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if there is no such knot.
    pub fn set_rate(&mut self, index: usize, rate: Rate) -> Result<()> {
        let n = self.t.len();
        if index >= n {
            return Err(Error::IndexOutOfRange { index, size: n });
        }
        self.r[index] = rate;
        self.rt[index] = rate * self.t[index];
        Ok(())
    }

    /// A copy of this curve with the zero rate of knot `index` replaced.
    pub fn with_rate(&self, rate: Rate, index: usize) -> Result<Self> {
        let mut curve = self.clone();
        curve.set_rate(index, rate)?;
        Ok(curve)
    }

    /// A copy with the same knots and new zero rates.
    pub fn with_rates(&self, rates: &[Rate]) -> Result<Self> {
        Self::new(&self.t, rates)
    }

    /// Move the time origin of the curve to `offset`.
    ///
    /// Knots at or before `offset` are dropped; the remaining knots move to
    /// `t − offset` and carry `rt(t) − rt(offset)`, so that discount factors
    /// of the new curve are forward discount factors of this one. A negative
    /// offset moves the origin back and extends the curve flat at `r_0`.
    ///
    /// # Errors
    /// Precondition error if no knot lies after `offset`.
    pub fn with_offset(&self, offset: Time) -> Result<Self> {
        let n = self.t.len();
        let start = self.t.partition_point(|&k| k <= offset);
        ensure!(
            start < n,
            "offset {offset} is at or beyond the last knot {}",
            self.t[n - 1]
        );
        let rt_offset = self.rt(offset);
        let t: Vec<Time> = self.t[start..].iter().map(|k| k - offset).collect();
        let rt: Vec<Real> = self.rt[start..].iter().map(|v| v - rt_offset).collect();
        let r = t.iter().zip(&rt).map(|(t, rt)| rt / t).collect();
        Ok(Self { t, r, rt })
    }
}
