// src/output.rs
use crate::error::PricingResult;
use crate::mc::mc_engine::PriceEstimate;
use crate::sweep::SweepReporter;
use std::io::Write;

const RULE: &str = "----------------------------------------------------------------------------------";

/// Prints the sweep as two fixed-width tables
pub struct TableReporter<W: Write> {
    out: W,
}

impl<W: Write> TableReporter<W> {
    pub fn new(out: W) -> Self {
        TableReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn interval(estimate: &PriceEstimate) -> String {
        format!("[{:.4}, {:.4}]", estimate.ci_lower, estimate.ci_upper)
    }
}

impl<W: Write> SweepReporter for TableReporter<W> {
    fn reference(&mut self, price: f64) -> PricingResult<()> {
        writeln!(
            self.out,
            "# Run date: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.out, "BSM call price: {:.6}", price)?;
        Ok(())
    }

    fn begin_convergence(&mut self) -> PricingResult<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{:<12}{:<12}{:<16}{:<26}{:<12}",
            "Sample size", "Price", "Standard error", "95% CI", "Time used"
        )?;
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    fn convergence_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()> {
        writeln!(
            self.out,
            "{:<12}{:<12.4}{:<16.6}{:<26}{:<12.4}",
            estimate.samples,
            estimate.estimate,
            estimate.std_error,
            Self::interval(estimate),
            estimate.elapsed_secs
        )?;
        Ok(())
    }

    fn begin_comparison(&mut self) -> PricingResult<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{:<11}{:<12}{:<10}{:<11}{:<26}{:<9}{:<12}",
            "Approach", "Sample size", "Price", "SE", "95% CI", "Time", "Efficiency"
        )?;
        writeln!(self.out, "{}", RULE)?;
        Ok(())
    }

    fn comparison_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()> {
        writeln!(
            self.out,
            "{:<11}{:<12}{:<10.4}{:<11.6}{:<26}{:<9.4}{:<12.3e}",
            estimate.method.label(),
            estimate.samples,
            estimate.estimate,
            estimate.std_error,
            Self::interval(estimate),
            estimate.elapsed_secs,
            estimate.efficiency()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> PricingResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every result in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub reference: Option<f64>,
    pub convergence: Vec<PriceEstimate>,
    pub comparison: Vec<PriceEstimate>,
}

impl SweepReporter for CollectingReporter {
    fn reference(&mut self, price: f64) -> PricingResult<()> {
        self.reference = Some(price);
        Ok(())
    }

    fn convergence_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()> {
        self.convergence.push(*estimate);
        Ok(())
    }

    fn comparison_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()> {
        self.comparison.push(*estimate);
        Ok(())
    }
}
