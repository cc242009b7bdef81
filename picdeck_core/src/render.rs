//! Namelist rendering.
//!
//! The engine's loader executes the deck as a Python script, so every block
//! becomes a constructor call with keyword arguments:
//!
//! ```text
//! Species(
//!     species_type = "electron1",
//!     mass = 1.0,
//!     ...
//! )
//! ```
//!
//! Blocks are serialized through serde first, so the keyword names and their
//! order are exactly the record's field names and declaration order.

use crate::error::DeckError;
use crate::namelist::{Component, Namelist};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

const HEADER: &str = "\
# ---------------------------------------------
# SIMULATION PARAMETERS FOR THE PIC-CODE SMILEI
# ---------------------------------------------

import math
L0 = 2.*math.pi # conversion from normalization length to wavelength
";

/// Renders a whole deck as namelist source.
pub fn render_namelist(deck: &Namelist) -> Result<String, DeckError> {
    let mut out = String::from(HEADER);

    render_block(&mut out, Component::Main, &deck.main)?;
    if let Some(window) = &deck.moving_window {
        render_block(&mut out, Component::MovingWindow, window)?;
    }
    for species in &deck.species {
        render_block(&mut out, Component::Species, species)?;
    }
    for collisions in &deck.collisions {
        render_block(&mut out, Component::Collisions, collisions)?;
    }
    for diag in &deck.diag_fields {
        render_block(&mut out, Component::DiagFields, diag)?;
    }
    for diag in &deck.diag_scalar {
        render_block(&mut out, Component::DiagScalar, diag)?;
    }
    for diag in &deck.diag_particle_binning {
        render_block(&mut out, Component::DiagParticleBinning, diag)?;
    }

    Ok(out)
}

/// Appends one `Component(key = value, ...)` block.
pub fn render_block<T: Serialize>(
    out: &mut String,
    component: Component,
    record: &T,
) -> Result<(), DeckError> {
    let value = serde_json::to_value(record)?;
    let fields = value.as_object().ok_or_else(|| {
        DeckError::render(format!("{} did not serialize to a keyword map", component))
    })?;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n{}(", component);
    for (key, value) in fields {
        let literal = python_literal(value)
            .map_err(|e| DeckError::render(format!("{}.{}: {}", component, key, e)))?;
        let _ = writeln!(out, "    {} = {},", key, literal);
    }
    out.push_str(")\n");

    Ok(())
}

/// Converts a JSON value to Python literal syntax.
pub fn python_literal(value: &Value) -> Result<String, String> {
    match value {
        // Absent optionals are skipped at serialization, so null only comes
        // from a NaN or infinite float.
        Value::Null => Err("non-finite value".to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                let f = n.as_f64().ok_or_else(|| format!("unrepresentable number {}", n))?;
                python_float(f)
            }
        }
        Value::String(s) => Ok(python_string(s)),
        Value::Array(items) => {
            let items = items
                .iter()
                .map(python_literal)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        Value::Object(_) => Err("nested maps are not valid keyword values".to_string()),
    }
}

/// Formats a float so Python reads it back as a float.
pub fn python_float(f: f64) -> Result<String, String> {
    if !f.is_finite() {
        return Err(format!("non-finite value {}", f));
    }
    // Debug keeps a decimal point or an exponent, both valid Python.
    Ok(format!("{:?}", f))
}

fn python_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // Control characters are all below U+00A0.
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagScalar, BinningAxis};
    use crate::run::MainBlock;
    use crate::species::{DensityProfile, Species};
    use serde_json::json;

    #[test]
    fn test_literals() {
        assert_eq!(python_literal(&json!(true)).unwrap(), "True");
        assert_eq!(python_literal(&json!(4)).unwrap(), "4");
        assert_eq!(python_literal(&json!(-1.0)).unwrap(), "-1.0");
        assert_eq!(python_literal(&json!(1e-10)).unwrap(), "1e-10");
        assert_eq!(python_literal(&json!(["periodic"])).unwrap(), "[\"periodic\"]");
        assert_eq!(python_literal(&json!("a\"b")).unwrap(), "\"a\\\"b\"");
        assert!(python_literal(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_control_characters_escaped() {
        assert_eq!(python_literal(&json!("a\rb")).unwrap(), "\"a\\rb\"");
        assert_eq!(python_literal(&json!("a\u{1}b\u{7f}")).unwrap(), "\"a\\x01b\\x7f\"");

        let deck = Namelist::new(MainBlock::default()).add_species(Species::electron("e\r\u{0}"));
        let text = render_namelist(&deck).unwrap();
        assert!(text.contains("    species_type = \"e\\r\\x00\",\n"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_density_profile_keywords() {
        let profile = DensityProfile::new("trapezoidal").with_lengths(&[vec![2.0, 20.0, 2.0]]);
        let deck = Namelist::new(MainBlock::default())
            .add_species(Species::electron("e").with_density_profile(profile));
        let text = render_namelist(&deck).unwrap();

        assert!(text.contains("    nb_density_profile = \"trapezoidal\",\n"));
        assert!(text.contains("    nb_density_length_x = [2.0, 20.0, 2.0],\n"));
        assert!(!text.contains("nb_density_length_y"));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        assert!(python_float(f64::NAN).is_err());
        assert!(python_float(f64::INFINITY).is_err());
    }

    #[test]
    fn test_block_layout() {
        let mut out = String::new();
        render_block(&mut out, Component::DiagScalar, &DiagScalar { every: 10000000 }).unwrap();
        assert_eq!(out, "\nDiagScalar(\n    every = 10000000,\n)\n");
    }

    #[test]
    fn test_axis_rendered_positionally() {
        let axis = BinningAxis::new("ekin", 0.0, 2.5, 1000);
        let value = serde_json::to_value(&axis).unwrap();
        assert_eq!(python_literal(&value).unwrap(), "[\"ekin\", 0.0, 2.5, 1000]");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let deck = Namelist::new(MainBlock::default()).add_species(Species::electron("e"));
        let text = render_namelist(&deck).unwrap();

        assert!(text.starts_with("# ----"));
        assert!(text.contains("\nMain(\n    geometry = \"1d3v\",\n"));
        assert!(text.contains("reference_angular_frequency_SI = "));
        assert!(!text.contains("atomic_number"));
        assert!(!text.contains("bc_em_type_y"));
    }

    #[test]
    fn test_non_finite_field_fails() {
        let mut main = MainBlock::default();
        main.timestep = f64::NAN;
        let err = render_namelist(&Namelist::new(main)).unwrap_err();
        assert!(matches!(err, DeckError::Render(_) | DeckError::Json(_)));
    }
}
