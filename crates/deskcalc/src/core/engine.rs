//! Calculator engine: input/accumulator state machine
//!
//! Two logical states: entering the first operand (nothing pending) and
//! operator pending. `awaiting_new_entry` is orthogonal to both and decides
//! whether the next digit starts a fresh number.
//!
//! Operators chain strictly left to right: each new operator commits the
//! pending one before it is recorded, so `5 + 3 * 2 =` gives 16.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::display::format_display;
use super::number::{parse_operand, parse_or_zero, stringify};
use super::{CalcError, Digit, Operator};
use crate::command::Command;
use crate::sink::{DisplaySink, NullSink};

/// Entry text at startup and after a clear
const INITIAL_ENTRY: &str = "0";

/// Left operand plus the operator waiting for a right operand
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingOperation {
    /// Left operand, or `None` when the entered text was unreadable
    pub left: Option<f64>,
    /// Operator to apply on the next commit
    pub operator: Operator,
}

/// All numeric state owned by the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorState {
    current_input: String,
    pending: Option<PendingOperation>,
    awaiting_new_entry: bool,
    memory: f64,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_input: INITIAL_ENTRY.to_string(),
            pending: None,
            awaiting_new_entry: false,
            memory: 0.0,
        }
    }
}

impl CalculatorState {
    /// Text currently being typed or shown
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn previous_input(&self) -> Option<f64> {
        self.pending.and_then(|p| p.left)
    }

    /// Pending operator
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    /// Whether the next digit starts a new number
    #[must_use]
    pub fn awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Whether the memory indicator should be lit
    #[must_use]
    pub fn memory_active(&self) -> bool {
        self.memory != 0.0
    }
}

/// The calculator engine
///
/// Owns a [`CalculatorState`] and reports to a [`DisplaySink`] after every
/// operation, including once at construction.
#[derive(Debug)]
pub struct Calculator<S = NullSink> {
    state: CalculatorState,
    sink: S,
}

impl Default for Calculator<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator<NullSink> {
    /// Creates an engine whose output goes nowhere
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(NullSink)
    }
}

impl<S: DisplaySink> Calculator<S> {
    /// Creates an engine reporting to `sink`; renders the startup readout
    pub fn with_sink(sink: S) -> Self {
        let mut calculator = Self {
            state: CalculatorState::default(),
            sink,
        };
        calculator.render();
        calculator
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Formatted readout for the current entry
    #[must_use]
    pub fn display(&self) -> String {
        format_display(&self.state.current_input)
    }

    /// The output sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the output sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the engine, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Dispatches a command to the matching operation
    pub fn apply(&mut self, command: Command) {
        trace!(?command, "apply");
        match command {
            Command::Digit(digit) => self.input_digit(digit),
            Command::Operator(operator) => self.input_operator(operator),
            Command::DecimalPoint => self.input_decimal_point(),
            Command::Evaluate => self.evaluate(),
            Command::ClearAll => self.clear_all(),
            Command::ClearEntry => self.clear_entry(),
            Command::Backspace => self.backspace(),
            Command::MemoryStore => self.memory_store(),
            Command::MemoryRecall => self.memory_recall(),
            Command::MemoryAdd => self.memory_add(),
            Command::MemorySubtract => self.memory_subtract(),
            Command::MemoryClear => self.memory_clear(),
        }
    }

    /// Enters a digit. A lone `"0"` is replaced rather than prefixed.
    ///
    /// A digit that would push the entry past the largest finite value is
    /// refused with an overflow notice.
    pub fn input_digit(&mut self, digit: Digit) {
        let entry = &mut self.state.current_input;
        if self.state.awaiting_new_entry {
            *entry = digit.as_char().to_string();
            self.state.awaiting_new_entry = false;
        } else if *entry == INITIAL_ENTRY {
            *entry = digit.as_char().to_string();
        } else {
            let mut candidate = entry.clone();
            candidate.push(digit.as_char());
            if candidate.parse::<f64>().is_ok_and(f64::is_infinite) {
                let error = CalcError::Overflow;
                warn!(%error, digits = entry.len(), "digit refused");
                self.sink.notify(&error);
            } else {
                *entry = candidate;
            }
        }
        self.render();
    }

    /// Enters the decimal point; a second point in one entry is ignored
    pub fn input_decimal_point(&mut self) {
        if self.state.awaiting_new_entry {
            self.state.current_input = "0.".to_string();
            self.state.awaiting_new_entry = false;
        } else if !self.state.current_input.contains('.') {
            self.state.current_input.push('.');
        }
        self.render();
    }

    /// Records `operator` as pending, committing any operation already
    /// pending first.
    pub fn input_operator(&mut self, operator: Operator) {
        let left = match self.state.pending.take() {
            None => parse_operand(&self.state.current_input),
            Some(pending) => {
                let result = self.perform(pending);
                if let Some(value) = result {
                    self.state.current_input = stringify(value);
                }
                result
            }
        };

        debug!(?left, %operator, "operator pending");
        self.state.pending = Some(PendingOperation { left, operator });
        self.state.awaiting_new_entry = true;
        self.render();
    }

    /// The "=" key. Without a pending operation only the readout refreshes.
    pub fn evaluate(&mut self) {
        if let Some(pending) = self.state.pending.take() {
            if let Some(value) = self.perform(pending) {
                self.state.current_input = stringify(value);
            }
            self.state.awaiting_new_entry = true;
            debug!(result = %self.state.current_input, "evaluated");
        }
        self.render();
    }

    /// Resets entry and pending operation; memory is kept
    pub fn clear_all(&mut self) {
        self.state = CalculatorState {
            memory: self.state.memory,
            ..CalculatorState::default()
        };
        self.render();
    }

    /// Resets only the current entry
    pub fn clear_entry(&mut self) {
        INITIAL_ENTRY.clone_into(&mut self.state.current_input);
        self.render();
    }

    /// Drops the last character; a single character becomes `"0"`
    pub fn backspace(&mut self) {
        let entry = &mut self.state.current_input;
        if entry.chars().count() > 1 {
            entry.pop();
        } else {
            INITIAL_ENTRY.clone_into(entry);
        }
        self.render();
    }

    /// MS: memory becomes the entered value (0 if unreadable)
    pub fn memory_store(&mut self) {
        self.state.memory = parse_or_zero(&self.state.current_input);
        self.render();
    }

    /// MR: the entry becomes the memory value
    pub fn memory_recall(&mut self) {
        self.state.current_input = stringify(self.state.memory);
        self.state.awaiting_new_entry = true;
        self.render();
    }

    /// M+: adds the entered value to memory
    pub fn memory_add(&mut self) {
        let value = parse_or_zero(&self.state.current_input);
        self.adjust_memory(value);
        self.render();
    }

    /// M-: subtracts the entered value from memory
    pub fn memory_subtract(&mut self) {
        let value = parse_or_zero(&self.state.current_input);
        self.adjust_memory(-value);
        self.render();
    }

    /// MC: memory back to zero
    pub fn memory_clear(&mut self) {
        self.state.memory = 0.0;
        self.render();
    }

    /// Applies the pending operation to the current entry.
    ///
    /// Returns the value to commit, or `None` to leave the entry text as it
    /// is. A rejected operation is reported and falls back to the left
    /// operand.
    fn perform(&mut self, pending: PendingOperation) -> Option<f64> {
        let right = parse_operand(&self.state.current_input);
        let (Some(left), Some(right_value)) = (pending.left, right) else {
            let error = CalcError::MalformedInput(self.state.current_input.clone());
            debug!(%error, "operand unreadable, keeping current value");
            return right;
        };

        match pending.operator.apply(left, right_value) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(%error, left, right = right_value, operator = %pending.operator, "operation rejected");
                self.sink.notify(&error);
                Some(left)
            }
        }
    }

    /// Memory keeps its old value if the change would overflow
    fn adjust_memory(&mut self, delta: f64) {
        let next = self.state.memory + delta;
        if next.is_finite() {
            self.state.memory = next;
        } else {
            let error = CalcError::Overflow;
            warn!(%error, memory = self.state.memory, delta, "memory change rejected");
            self.sink.notify(&error);
        }
    }

    fn render(&mut self) {
        let display = format_display(&self.state.current_input);
        let memory_active = self.state.memory_active();
        self.sink.render(&display, memory_active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_key_sequence;
    use crate::sink::RecordingSink;

    fn recording() -> Calculator<RecordingSink> {
        Calculator::with_sink(RecordingSink::new())
    }

    fn press(calc: &mut Calculator<RecordingSink>, keys: &str) {
        for command in parse_key_sequence(keys).unwrap() {
            calc.apply(command);
        }
    }

    fn digit(d: u8) -> Digit {
        Digit::new(d).unwrap()
    }

    // ===== Startup =====

    #[test]
    fn test_startup_defaults() {
        let calc = Calculator::new();
        let state = calc.state();
        assert_eq!(state.current_input(), "0");
        assert_eq!(state.previous_input(), None);
        assert_eq!(state.operator(), None);
        assert!(!state.awaiting_new_entry());
        assert_eq!(state.memory(), 0.0);
    }

    #[test]
    fn test_startup_renders_once() {
        let calc = recording();
        assert_eq!(calc.sink().frames().len(), 1);
        assert_eq!(calc.sink().last().unwrap().display, "0");
        assert!(!calc.sink().last().unwrap().memory_active);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(
            Calculator::<NullSink>::default().state(),
            Calculator::new().state()
        );
    }

    // ===== Digit entry =====

    #[test]
    fn test_digit_replaces_leading_zero() {
        let mut calc = Calculator::new();
        calc.input_digit(digit(5));
        assert_eq!(calc.state().current_input(), "5");
    }

    #[test]
    fn test_zero_appends_after_nonzero() {
        let mut calc = Calculator::new();
        calc.input_digit(digit(5));
        calc.input_digit(digit(0));
        assert_eq!(calc.state().current_input(), "50");
    }

    #[test]
    fn test_repeated_zero_stays_single() {
        let mut calc = Calculator::new();
        calc.input_digit(digit(0));
        calc.input_digit(digit(0));
        assert_eq!(calc.state().current_input(), "0");
    }

    #[test]
    fn test_digit_after_operator_starts_fresh() {
        let mut calc = recording();
        press(&mut calc, "12+3");
        assert_eq!(calc.state().current_input(), "3");
        assert!(!calc.state().awaiting_new_entry());
    }

    #[test]
    fn test_every_operation_renders() {
        let mut calc = recording();
        press(&mut calc, "1.5+2=<BS><CE><MS><MR><M+><M-><MC><Esc>");
        // one startup frame plus one per key
        assert_eq!(calc.sink().frames().len(), 1 + 14);
    }

    #[test]
    fn test_digit_past_largest_value_refused() {
        let mut calc = recording();
        for _ in 0..310 {
            calc.input_digit(digit(9));
        }

        // 308 nines fit below f64::MAX, a 309th would not
        assert_eq!(calc.state().current_input().len(), 308);
        assert_eq!(
            calc.sink().notices(),
            &[CalcError::Overflow, CalcError::Overflow]
        );
        let shown = &calc.sink().last().unwrap().display;
        assert_eq!(shown, "1.000000e+308");

        press(&mut calc, "+1=");
        let result: f64 = calc.state().current_input().parse().unwrap();
        assert!(result.is_finite() && result > 9e307);
        assert_eq!(calc.sink().notices().len(), 2);
    }

    #[test]
    fn test_long_fraction_never_overflows() {
        let mut calc = recording();
        press(&mut calc, "0.");
        for _ in 0..400 {
            calc.input_digit(digit(9));
        }
        assert_eq!(calc.state().current_input().len(), 402);
        assert!(calc.sink().notices().is_empty());
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_point_appends_once() {
        let mut calc = Calculator::new();
        calc.input_digit(digit(3));
        calc.input_decimal_point();
        calc.input_decimal_point();
        calc.input_digit(digit(1));
        calc.input_decimal_point();
        assert_eq!(calc.state().current_input(), "3.1");
    }

    #[test]
    fn test_decimal_point_on_zero() {
        let mut calc = Calculator::new();
        calc.input_decimal_point();
        calc.input_digit(digit(5));
        assert_eq!(calc.state().current_input(), "0.5");
    }

    #[test]
    fn test_decimal_point_when_awaiting() {
        let mut calc = recording();
        press(&mut calc, "7+.");
        assert_eq!(calc.state().current_input(), "0.");
        assert!(!calc.state().awaiting_new_entry());
    }

    // ===== Operators and chaining =====

    #[test]
    fn test_operator_records_left_operand() {
        let mut calc = recording();
        press(&mut calc, "12+");
        assert_eq!(calc.state().previous_input(), Some(12.0));
        assert_eq!(calc.state().operator(), Some(Operator::Add));
        assert!(calc.state().awaiting_new_entry());
    }

    #[test]
    fn test_chain_is_left_to_right() {
        let mut calc = recording();
        press(&mut calc, "5+3*");
        assert_eq!(calc.state().current_input(), "8");
        assert_eq!(calc.state().previous_input(), Some(8.0));
        press(&mut calc, "2=");
        assert_eq!(calc.state().current_input(), "16");
    }

    #[test]
    fn test_repeated_operator_commits_with_same_entry() {
        let mut calc = recording();
        press(&mut calc, "5++");
        assert_eq!(calc.state().current_input(), "10");
        assert_eq!(calc.state().operator(), Some(Operator::Add));
    }

    #[test]
    fn test_evaluate_clears_pending() {
        let mut calc = recording();
        press(&mut calc, "9-4=");
        assert_eq!(calc.state().current_input(), "5");
        assert_eq!(calc.state().pending(), None);
        assert!(calc.state().awaiting_new_entry());
    }

    #[test]
    fn test_evaluate_without_pending_is_noop() {
        let mut calc = recording();
        press(&mut calc, "9-4=");
        let before = calc.state().clone();
        press(&mut calc, "==");
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_evaluate_fraction_result() {
        let mut calc = recording();
        press(&mut calc, "1/4=");
        assert_eq!(calc.state().current_input(), "0.25");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let mut calc = recording();
        press(&mut calc, "2*3=7");
        assert_eq!(calc.state().current_input(), "7");
    }

    // ===== Divide by zero =====

    #[test]
    fn test_divide_by_zero_keeps_left_operand() {
        let mut calc = recording();
        press(&mut calc, "10/0=");
        assert_eq!(calc.state().current_input(), "10");
        assert_eq!(calc.sink().notices(), &[CalcError::DivideByZero]);
        assert_eq!(calc.state().pending(), None);
    }

    #[test]
    fn test_divide_by_zero_in_chain() {
        let mut calc = recording();
        press(&mut calc, "10/0+");
        assert_eq!(calc.state().current_input(), "10");
        assert_eq!(calc.state().previous_input(), Some(10.0));
        assert_eq!(calc.state().operator(), Some(Operator::Add));
        assert_eq!(calc.sink().notices().len(), 1);
    }

    #[test]
    fn test_overflow_keeps_left_operand() {
        let mut calc = recording();
        calc.state.current_input = "1e308".to_string();
        press(&mut calc, "*10=");
        assert_eq!(calc.state().current_input(), "1e308");
        assert_eq!(calc.sink().notices(), &[CalcError::Overflow]);
    }

    // ===== Malformed operands =====

    #[test]
    fn test_malformed_right_operand_keeps_entry() {
        // a negative result is the only way to get a sign into the entry
        let mut calc = recording();
        press(&mut calc, "3-8=");
        assert_eq!(calc.state().current_input(), "-5");
        press(&mut calc, "<BS>");
        assert_eq!(calc.state().current_input(), "-");
        press(&mut calc, "+2=");
        assert_eq!(calc.state().current_input(), "2");
        assert!(calc.sink().notices().is_empty());
    }

    #[test]
    fn test_malformed_entry_shown_verbatim() {
        let mut calc = recording();
        press(&mut calc, "3-8=<BS>");
        assert_eq!(calc.sink().last().unwrap().display, "-");
    }

    // ===== Clearing =====

    #[test]
    fn test_clear_all_restores_defaults() {
        let mut calc = recording();
        press(&mut calc, "12+34.5");
        calc.clear_all();
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_clear_all_keeps_memory() {
        let mut calc = recording();
        press(&mut calc, "42<MS><Esc>");
        assert_eq!(calc.state().memory(), 42.0);
        assert_eq!(calc.state().current_input(), "0");
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let mut calc = recording();
        press(&mut calc, "12+34<CE>");
        assert_eq!(calc.state().current_input(), "0");
        assert_eq!(calc.state().previous_input(), Some(12.0));
        assert_eq!(calc.state().operator(), Some(Operator::Add));
        press(&mut calc, "5=");
        assert_eq!(calc.state().current_input(), "17");
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last_char() {
        let mut calc = recording();
        press(&mut calc, "123<BS>");
        assert_eq!(calc.state().current_input(), "12");
    }

    #[test]
    fn test_backspace_single_char_resets() {
        let mut calc = recording();
        press(&mut calc, "7<BS>");
        assert_eq!(calc.state().current_input(), "0");
        press(&mut calc, "<BS>");
        assert_eq!(calc.state().current_input(), "0");
    }

    // ===== Memory =====

    #[test]
    fn test_memory_round_trip() {
        let mut calc = recording();
        press(&mut calc, "42<MS><Esc><MR>");
        assert_eq!(calc.state().current_input(), "42");
        assert!(calc.state().awaiting_new_entry());
    }

    #[test]
    fn test_memory_add_and_subtract() {
        let mut calc = recording();
        press(&mut calc, "10<M+>3<M+>");
        assert_eq!(calc.state().memory(), 13.0);
        press(&mut calc, "<Esc>20<M->");
        assert_eq!(calc.state().memory(), -7.0);
    }

    #[test]
    fn test_memory_clear() {
        let mut calc = recording();
        press(&mut calc, "5<MS><MC>");
        assert_eq!(calc.state().memory(), 0.0);
        assert!(!calc.sink().last().unwrap().memory_active);
    }

    #[test]
    fn test_memory_indicator_follows_register() {
        let mut calc = recording();
        press(&mut calc, "5<MS>");
        assert!(calc.sink().last().unwrap().memory_active);
        press(&mut calc, "<M->");
        assert!(!calc.sink().last().unwrap().memory_active);
    }

    #[test]
    fn test_memory_store_malformed_is_zero() {
        let mut calc = recording();
        press(&mut calc, "9<MS><Esc>3-8=<BS><MS>");
        assert_eq!(calc.state().memory(), 0.0);
    }

    #[test]
    fn test_memory_overflow_rejected() {
        let mut calc = recording();
        calc.state.current_input = "1.7e308".to_string();
        press(&mut calc, "<M+><M+>");
        assert_eq!(calc.state().memory(), 1.7e308);
        assert_eq!(calc.sink().notices(), &[CalcError::Overflow]);
    }

    #[test]
    fn test_memory_recall_formats_fraction() {
        let mut calc = recording();
        press(&mut calc, "2.50<MS><Esc><MR>");
        assert_eq!(calc.state().current_input(), "2.5");
    }

    // ===== Display =====

    #[test]
    fn test_display_groups_thousands() {
        let mut calc = recording();
        press(&mut calc, "1234");
        assert_eq!(calc.display(), "1,234");
        assert_eq!(calc.sink().last().unwrap().display, "1,234");
        assert_eq!(calc.state().current_input(), "1234");
    }

    #[test]
    fn test_display_scientific_for_large_result() {
        let mut calc = recording();
        press(&mut calc, "1234567*1000000=");
        assert_eq!(calc.display(), "1.234567e+12");
    }

    #[test]
    fn test_into_sink() {
        let mut calc = recording();
        press(&mut calc, "1");
        let sink = calc.into_sink();
        assert_eq!(sink.frames().len(), 2);
    }

    #[test]
    fn test_sink_mut() {
        let mut calc = recording();
        calc.sink_mut().clear();
        assert!(calc.sink().frames().is_empty());
    }
}
