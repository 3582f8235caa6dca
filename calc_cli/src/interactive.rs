//! Interactive prompt mode.
//!
//! Walks the user through one calculator form at a time. Typing `clear` at
//! any prompt resets the form to its defaults; `q` at the menu exits.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use calc_core::calculations::CalculatorKind;
use calc_core::errors::CalcError;
use calc_core::form::CalculatorForm;
use calc_core::units::{LengthUnit, MassUnit, TimeUnit};
use calc_core::Sex;

use crate::display;

/// Outcome of a single prompt
enum Step<T> {
    Value(T),
    Clear,
    Quit,
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim_end().to_string()),
    }
}

fn prompt_raw(prompt: &str) -> Step<String> {
    match read_line(prompt) {
        None => Step::Quit,
        Some(line) if line.trim().eq_ignore_ascii_case("clear") => Step::Clear,
        Some(line) => Step::Value(line),
    }
}

/// Prompt for a unit tag or sex; empty input keeps `current`.
fn prompt_choice<T>(prompt: &str, current: T) -> Step<T>
where
    T: FromStr<Err = CalcError> + Copy,
{
    loop {
        match prompt_raw(prompt) {
            Step::Value(line) if line.trim().is_empty() => return Step::Value(current),
            Step::Value(line) => match line.parse() {
                Ok(value) => return Step::Value(value),
                Err(e) => println!("  {}", e),
            },
            Step::Clear => return Step::Clear,
            Step::Quit => return Step::Quit,
        }
    }
}

fn choose_calculator() -> Option<CalculatorKind> {
    loop {
        println!();
        for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
            println!("  {}. {}", i + 1, kind.display_name());
        }
        let line = read_line("Select calculator [1-4, q to quit]: ")?;
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return None;
        }
        let by_index = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| CalculatorKind::ALL.get(i).copied());
        match by_index.or_else(|| choice.parse().ok()) {
            Some(kind) => return Some(kind),
            None => println!("  Unknown calculator '{}'", choice),
        }
    }
}

/// Collect unit selections and fields. Returns `Step::Value(())` when the form is filled.
fn fill_form(form: &mut CalculatorForm) -> Step<()> {
    macro_rules! ask {
        ($expr:expr) => {
            match $expr {
                Step::Value(v) => v,
                Step::Clear => return Step::Clear,
                Step::Quit => return Step::Quit,
            }
        };
    }

    let kind = form.kind();
    if kind == CalculatorKind::BodyWeight {
        let sex = ask!(prompt_choice::<Sex>(&format!("Sex (male/female) [{}]: ", form.sex()), form.sex()));
        form.set_sex(sex);
    }
    if kind == CalculatorKind::DripRate {
        let units = form.units();
        let unit = ask!(prompt_choice::<TimeUnit>(&format!("Time unit (hr/min) [{}]: ", units.time), units.time));
        form.set_time_unit(unit);
    }
    if matches!(kind, CalculatorKind::Bsa | CalculatorKind::BodyWeight) {
        let units = form.units();
        let unit = ask!(prompt_choice::<LengthUnit>(
            &format!("Height unit (cm/in) [{}]: ", units.length),
            units.length
        ));
        form.set_length_unit(unit);
    }
    if kind != CalculatorKind::DripRate {
        let units = form.units();
        let unit = ask!(prompt_choice::<MassUnit>(&format!("Weight unit (kg/lbs) [{}]: ", units.mass), units.mass));
        form.set_mass_unit(unit);
    }

    for name in kind.fields() {
        let (label, unit) = display::field_label(name, &form.units());
        let raw = ask!(prompt_raw(&format!("{} ({}): ", label, unit)));
        form.set_field(*name, raw);
    }
    Step::Value(())
}

/// Run the prompt loop until the user quits or input ends.
pub fn run(json: bool) {
    println!("Bedside Calc - Clinical Calculators");
    println!("===================================");
    println!("Type 'clear' at any prompt to reset the form.");

    while let Some(kind) = choose_calculator() {
        let mut form = CalculatorForm::new(kind);
        println!();
        println!("{}", kind.display_name());

        loop {
            match fill_form(&mut form) {
                Step::Value(()) => break,
                Step::Clear => {
                    let units = form.clear();
                    println!("  Form cleared (units reset to {}, {}, {}).", units.mass, units.length, units.time);
                }
                Step::Quit => return,
            }
        }

        let outcome = form.evaluate();
        println!();
        if json {
            display::print_json(&outcome);
            continue;
        }
        match &outcome {
            Ok(result) => display::print_result(kind, result),
            Err(err) => display::print_no_result(err),
        }
    }
}
