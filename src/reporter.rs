//! Parenthesization reporter.
//!
//! Renders the optimal split tree as a fully bracketed string such as
//! `((A(BC))((DE)F))`. Labels come from a [`LabelGenerator`] that is threaded
//! through the walk and hands out one fresh label per leaf, left to right.

use std::convert::Infallible;

use crate::plan::ChainPlan;
use crate::traits::{Split, SplitFold};

/// How leaves are named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelStyle {
    /// `A, B, ..., Z, AA, AB, ...`; operands are written without separator
    /// while every label is a single letter, and with a space once the
    /// chain runs past `Z`.
    #[default]
    Letters,
    /// `A1, A2, ...`; operands are separated by a space.
    Indexed,
}

impl LabelStyle {
    /// Separator between operands when the widest label belongs to leaf
    /// `last`. Adjacent labels must stay unambiguous.
    fn separator(self, last: usize) -> &'static str {
        match self {
            LabelStyle::Letters if last < 26 => "",
            LabelStyle::Letters | LabelStyle::Indexed => " ",
        }
    }
}

/// Sequential label source.
#[derive(Clone, Debug)]
pub struct LabelGenerator {
    style: LabelStyle,
    next: usize,
}

impl LabelGenerator {
    pub fn new(style: LabelStyle) -> Self {
        Self { style, next: 0 }
    }

    /// Start numbering at the given leaf position instead of zero.
    pub fn starting_at(style: LabelStyle, position: usize) -> Self {
        Self {
            style,
            next: position,
        }
    }

    /// Label for the `position`-th leaf (zero based).
    pub fn label_for(style: LabelStyle, position: usize) -> String {
        match style {
            LabelStyle::Letters => spreadsheet_column(position),
            LabelStyle::Indexed => format!("A{}", position + 1),
        }
    }
}

impl Iterator for LabelGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let label = Self::label_for(self.style, self.next);
        self.next += 1;
        Some(label)
    }
}

/// Bijective base-26: 0 -> A, 25 -> Z, 26 -> AA, 701 -> ZZ, 702 -> AAA.
fn spreadsheet_column(mut position: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (position % 26) as u8);
        if position < 26 {
            break;
        }
        position = position / 26 - 1;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Renders a [`ChainPlan`] as a parenthesized string.
#[derive(Clone, Debug)]
pub struct Parenthesizer {
    labels: LabelGenerator,
    separator: &'static str,
}

impl Parenthesizer {
    /// Bracketing of the whole chain.
    ///
    /// ```
    /// use chain_dp::{ChainDims, ChainPlan, LabelStyle, Parenthesizer};
    ///
    /// let plan = ChainPlan::new(&ChainDims::new(vec![1, 2, 3, 4]).unwrap());
    /// assert_eq!(Parenthesizer::render(&plan, LabelStyle::Letters), "((AB)C)");
    /// assert_eq!(Parenthesizer::render(&plan, LabelStyle::Indexed), "((A1 A2) A3)");
    /// ```
    pub fn render(plan: &ChainPlan, style: LabelStyle) -> String {
        Self::render_range(plan, style, 0, plan.len() - 1)
    }

    /// Bracketing of matrices `i..=j`, labelled from `i` onwards so that
    /// sub-chain labels agree with the full rendering.
    pub fn render_range(plan: &ChainPlan, style: LabelStyle, i: usize, j: usize) -> String {
        let mut this = Self {
            labels: LabelGenerator::starting_at(style, i),
            separator: style.separator(j),
        };
        match plan.fold(&mut this, i, j) {
            Ok(text) => text,
            Err(never) => match never {},
        }
    }
}

impl SplitFold for Parenthesizer {
    type Output = String;
    type Error = Infallible;

    fn leaf(&mut self, _index: usize) -> Result<String, Infallible> {
        Ok(self.labels.next().unwrap_or_default())
    }

    fn combine(&mut self, left: String, right: String, _split: Split) -> Result<String, Infallible> {
        Ok(format!("({left}{}{right})", self.separator))
    }
}
