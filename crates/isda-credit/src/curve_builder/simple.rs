//! `SimpleCreditCurveBuilder`: bootstrap by full repricing.

use isda_core::{errors::Result, Real};
use isda_curves::{CreditCurve, YieldTermStructure};

use super::{bootstrap, validate, AccrualOnDefaultFormula, ArbitrageHandling, CreditCurveCalibrator};
use crate::cds_analytic::CdsAnalytic;
use crate::pricer::{AnalyticCdsPricer, PriceType};

/// Calibrator that reprices every pillar with [`AnalyticCdsPricer`] at each
/// trial rate. Slower than
/// [`FastCreditCurveBuilder`](super::FastCreditCurveBuilder), and useful as a
/// reference for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimpleCreditCurveBuilder {
    pricer: AnalyticCdsPricer,
    handling: ArbitrageHandling,
}

impl SimpleCreditCurveBuilder {
    /// A calibrator with the given accrual-on-default formula and the default
    /// arbitrage policy.
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self::with_arbitrage_handling(formula, ArbitrageHandling::default())
    }

    /// A calibrator with an explicit arbitrage policy.
    pub fn with_arbitrage_handling(formula: AccrualOnDefaultFormula, handling: ArbitrageHandling) -> Self {
        Self {
            pricer: AnalyticCdsPricer::new(formula),
            handling,
        }
    }
}

impl CreditCurveCalibrator for SimpleCreditCurveBuilder {
    fn accrual_formula(&self) -> AccrualOnDefaultFormula {
        self.pricer.formula()
    }

    fn arbitrage_handling(&self) -> ArbitrageHandling {
        self.handling
    }

    fn calibrate_with_upfront(
        &self,
        cds: &[CdsAnalytic],
        premiums: &[Real],
        yc: &dyn YieldTermStructure,
        pufs: &[Real],
    ) -> Result<CreditCurve> {
        validate(cds, premiums, pufs)?;
        bootstrap(self.handling, cds, premiums, pufs, |i, cc| {
            self.pricer.pv(&cds[i], yc, cc, premiums[i], PriceType::Clean) - pufs[i]
        })
    }
}
