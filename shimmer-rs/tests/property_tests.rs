use proptest::prelude::*;
use shimmer::index::{resolve_index, IndexBounds};
use shimmer::lexicon::{boolean_words, recognize_boolean};
use shimmer::list::{format_list, split_list};
use shimmer::temporal::{self, MAX_DATE_TIME_TICKS};
use shimmer::{
    resolve_boolean, resolve_date_time, resolve_double, resolve_numeric, resolve_time_span,
    resolve_value, resolve_wide_integer, Decimal, ParseConfig, ParseFlags, Value,
};

const F: ParseFlags = ParseFlags::DEFAULT;

fn cfg() -> ParseConfig {
    ParseConfig::default()
}

proptest! {
    /// Integers that fit 32 bits come back as `Integer`.
    #[test]
    fn i32_text_is_integer(n in any::<i32>()) {
        prop_assert_eq!(resolve_numeric(&n.to_string(), F, &cfg()).unwrap(), Value::Integer(n));
    }

    /// Wider integers come back as `WideInteger`.
    #[test]
    fn i64_text_is_wide(n in any::<i64>().prop_filter("outside i32", |n| i32::try_from(*n).is_err())) {
        prop_assert_eq!(resolve_numeric(&n.to_string(), F, &cfg()).unwrap(), Value::WideInteger(n));
    }
}

proptest! {
    /// `sign + prefix + digits(m)` reads back as `sign * m` in every radix.
    #[test]
    fn radix_literals(n in any::<i64>().prop_filter("negated minimum", |n| *n != i64::MIN)) {
        let sign = if n < 0 { "-" } else { "" };
        let m = n.unsigned_abs();
        for text in [
            format!("{sign}0b{m:b}"),
            format!("{sign}0o{m:o}"),
            format!("{sign}0d{m}"),
            format!("{sign}0x{m:x}"),
            format!("{sign}0X{m:X}"),
        ] {
            prop_assert_eq!(resolve_wide_integer(&text, F, &cfg()).unwrap(), n, "{}", text);
        }
    }

    /// Unsigned hex wraps into the signed range.
    #[test]
    fn radix_unsigned_wraps(m in any::<u64>()) {
        let text = format!("0x{m:x}");
        prop_assert_eq!(resolve_wide_integer(&text, F, &cfg()).unwrap(), m as i64);
    }
}

proptest! {
    /// Every boolean word is accepted in any letter case.
    #[test]
    fn boolean_words_any_case(upper in proptest::collection::vec(any::<bool>(), 8)) {
        for word in boolean_words() {
            let mixed: String = word
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &u)| if u { c.to_ascii_uppercase() } else { c })
                .collect();
            let (value, _) = recognize_boolean(word, true).unwrap();
            prop_assert_eq!(resolve_boolean(&mixed, F, &cfg()).unwrap(), value, "{}", mixed);
        }
    }
}

proptest! {
    /// Rendering a resolved double and resolving it again is the identity.
    #[test]
    fn double_rendering_idempotent(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let text = Value::Double(x).to_string();
        let back = resolve_double(&text, F, &cfg()).unwrap();
        prop_assert_eq!(back, x, "{}", text);
        prop_assert_eq!(Value::Double(back).to_string(), text);
    }

    #[test]
    fn decimal_rendering_idempotent(mantissa in any::<i64>(), scale in 1u32..12) {
        let d = Decimal::new(i128::from(mantissa), scale).unwrap();
        let text = d.to_string();
        let once = resolve_numeric(&text, F, &cfg()).unwrap();
        prop_assert_eq!(&once, &Value::Decimal(d));
        prop_assert_eq!(once.to_string(), text);
    }

    #[test]
    fn date_time_rendering_idempotent(ticks in 0..=MAX_DATE_TIME_TICKS) {
        let dt = temporal::ticks_to_date_time(ticks).unwrap();
        let text = Value::DateTime(dt).to_string();
        prop_assert_eq!(resolve_date_time(&text, F, &cfg()).unwrap(), dt, "{}", text);
    }

    #[test]
    fn time_span_rendering_idempotent(ticks in -(1i64 << 62)..(1i64 << 62)) {
        let span = temporal::ticks_to_time_span(ticks);
        let text = Value::TimeSpan(span).to_string();
        prop_assert_eq!(resolve_time_span(&text, F, &cfg()).unwrap(), span, "{}", text);
    }

    #[test]
    fn boolean_rendering_idempotent(b in any::<bool>()) {
        let text = Value::Boolean(b).to_string();
        prop_assert_eq!(resolve_boolean(&text, F, &cfg()).unwrap(), b);
    }
}

proptest! {
    /// Lists built from arbitrary elements split back into those elements.
    #[test]
    fn list_format_then_split(items in proptest::collection::vec("\\PC*", 0..6)) {
        prop_assert_eq!(split_list(&format_list(&items[..])).unwrap(), items);
    }
}

proptest! {
    /// Resolvers return `Ok` or `Err` on any input, never panic.
    #[test]
    fn resolvers_do_not_panic(s in "\\PC*") {
        let c = cfg();
        let _ = resolve_value(&s, F | ParseFlags::LIST | ParseFlags::CHARACTER, &c);
        let _ = resolve_numeric(&s, F | ParseFlags::VERBOSE, &c);
        let _ = resolve_index(&s, &IndexBounds::for_count(5, true), ParseFlags::INDEX, &c);
    }

    /// Index expressions never panic on arithmetic edge cases.
    #[test]
    fn index_arithmetic_does_not_panic(a in any::<i64>(), b in any::<i64>(), op in "[-+*/%]") {
        let text = format!("{a}{op}{b}");
        let _ = resolve_index(&text, &IndexBounds::for_count(10, false), ParseFlags::INDEX, &cfg());
    }
}
