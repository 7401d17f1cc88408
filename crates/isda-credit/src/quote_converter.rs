//! `MarketQuoteConverter`: moves CDS quotes between par spread, quoted spread
//! and points upfront.
//!
//! Par spreads describe a whole term structure, so converting them needs a
//! calibrated curve over the strip. Quoted spreads are single-name flat-curve
//! quantities and are converted one CDS at a time.

use isda_core::{ensure, errors::Result, Real};
use isda_curves::YieldTermStructure;

use crate::cds_analytic::CdsAnalytic;
use crate::curve_builder::{
    AccrualOnDefaultFormula, ArbitrageHandling, CreditCurveCalibrator, FastCreditCurveBuilder,
};
use crate::pricer::{AnalyticCdsPricer, PriceType};
use crate::quotes::{CdsQuote, PointsUpFront};

/// Quote converter built on a calibrator and a pricer sharing one
/// accrual-on-default formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketQuoteConverter {
    builder: FastCreditCurveBuilder,
    pricer: AnalyticCdsPricer,
}

impl MarketQuoteConverter {
    /// A converter using the given accrual-on-default formula.
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self {
            builder: FastCreditCurveBuilder::new(formula, ArbitrageHandling::Ignore),
            pricer: AnalyticCdsPricer::new(formula),
        }
    }

    /// The accrual-on-default formula.
    pub fn formula(&self) -> AccrualOnDefaultFormula {
        self.pricer.formula()
    }

    /// Clean upfronts of fixed-coupon CDSs given the par spreads of the same
    /// strip.
    pub fn par_spreads_to_puf(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        spreads: &[Real],
    ) -> Result<Vec<Real>> {
        let cc = self.builder.calibrate_par_spreads(cds, spreads, yc)?;
        Ok(cds
            .iter()
            .map(|c| self.pricer.pv(c, yc, &cc, coupon, PriceType::Clean))
            .collect())
    }

    /// Par spreads of a strip given its clean upfronts at `coupon`.
    pub fn puf_to_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        pufs: &[Real],
    ) -> Result<Vec<Real>> {
        let premiums = vec![coupon; pufs.len()];
        let cc = self.builder.calibrate_with_upfront(cds, &premiums, yc, pufs)?;
        self.pricer.par_spreads(cds, yc, &cc)
    }

    /// Clean upfront of a CDS quoted at `quoted_spread`.
    pub fn quoted_spread_to_puf(
        &self,
        cds: &CdsAnalytic,
        coupon: Real,
        yc: &dyn YieldTermStructure,
        quoted_spread: Real,
    ) -> Result<Real> {
        let flat = self
            .builder
            .calibrate_par_spreads(std::slice::from_ref(cds), &[quoted_spread], yc)?;
        Ok(self.pricer.pv(cds, yc, &flat, coupon, PriceType::Clean))
    }

    /// Quoted spread of a CDS with clean upfront `puf` at `coupon`.
    pub fn puf_to_quoted_spread(
        &self,
        cds: &CdsAnalytic,
        coupon: Real,
        yc: &dyn YieldTermStructure,
        puf: Real,
    ) -> Result<Real> {
        let flat = self
            .builder
            .calibrate_with_upfront(std::slice::from_ref(cds), &[coupon], yc, &[puf])?;
        self.pricer.par_spread(cds, yc, &flat)
    }

    /// [`quoted_spread_to_puf`](Self::quoted_spread_to_puf) for each CDS.
    pub fn quoted_spreads_to_puf(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        quoted_spreads: &[Real],
    ) -> Result<Vec<Real>> {
        ensure!(
            cds.len() == quoted_spreads.len(),
            "{} CDSs but {} quoted spreads",
            cds.len(),
            quoted_spreads.len()
        );
        cds.iter()
            .zip(quoted_spreads)
            .map(|(c, &qs)| self.quoted_spread_to_puf(c, coupon, yc, qs))
            .collect()
    }

    /// [`puf_to_quoted_spread`](Self::puf_to_quoted_spread) for each CDS.
    pub fn puf_to_quoted_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        pufs: &[Real],
    ) -> Result<Vec<Real>> {
        ensure!(
            cds.len() == pufs.len(),
            "{} CDSs but {} upfronts",
            cds.len(),
            pufs.len()
        );
        cds.iter()
            .zip(pufs)
            .map(|(c, &puf)| self.puf_to_quoted_spread(c, coupon, yc, puf))
            .collect()
    }

    /// Par spreads of a strip quoted by quoted spreads.
    pub fn quoted_spreads_to_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        quoted_spreads: &[Real],
    ) -> Result<Vec<Real>> {
        let pufs = self.quoted_spreads_to_puf(cds, coupon, yc, quoted_spreads)?;
        self.puf_to_par_spreads(cds, coupon, yc, &pufs)
    }

    /// Quoted spreads of a strip quoted by par spreads.
    pub fn par_spreads_to_quoted_spreads(
        &self,
        cds: &[CdsAnalytic],
        coupon: Real,
        yc: &dyn YieldTermStructure,
        spreads: &[Real],
    ) -> Result<Vec<Real>> {
        let pufs = self.par_spreads_to_puf(cds, coupon, yc, spreads)?;
        self.puf_to_quoted_spreads(cds, coupon, yc, &pufs)
    }

    /// Express a single-name quote as points upfront at its own coupon.
    ///
    /// A par spread is its own coupon and so has zero upfront.
    pub fn to_points_upfront(
        &self,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        quote: &CdsQuote,
    ) -> Result<PointsUpFront> {
        match *quote {
            CdsQuote::ParSpread(p) => Ok(PointsUpFront::new(p.spread, 0.0)),
            CdsQuote::PointsUpFront(p) => Ok(p),
            CdsQuote::QuotedSpread(q) => Ok(PointsUpFront::new(
                q.coupon,
                self.quoted_spread_to_puf(cds, q.coupon, yc, q.quoted_spread)?,
            )),
        }
    }
}
