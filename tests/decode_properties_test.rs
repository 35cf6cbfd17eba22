use boleto_pix::domain::boleto::{BoletoInput, BoletoKind, decode};
use boleto_pix::error::PixError;
use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

mod common;

#[test]
fn test_amount_round_trip_random() {
    let mut rng = rand::thread_rng();
    let mut samples: Vec<u64> = vec![0, 1, 99, 100, 9_999_999_999];
    samples.extend((0..500).map(|_| rng.gen_range(0..=9_999_999_999u64)));

    for centavos in samples {
        let expected = Decimal::new(centavos as i64, 2);

        let parsed = decode(&BoletoInput::linha_digitavel(common::linha(0, centavos))).unwrap();
        assert_eq!(parsed.amount, expected, "linha with {centavos} centavos");

        let parsed = decode(&BoletoInput::codigo_barras(common::barras(0, centavos))).unwrap();
        assert_eq!(parsed.amount, expected, "barras with {centavos} centavos");
    }
}

#[test]
fn test_format_exclusivity_by_length() {
    for len in 0..=60 {
        let digits = "1".repeat(len);
        let as_linha = decode(&BoletoInput::linha_digitavel(digits.clone()));
        let as_barras = decode(&BoletoInput::codigo_barras(digits));

        match len {
            47 => {
                assert_eq!(as_linha.unwrap().kind, BoletoKind::LinhaDigitavel47);
                assert!(matches!(as_barras, Err(PixError::UnsupportedFormat)));
            }
            44 => {
                assert!(matches!(as_linha, Err(PixError::UnsupportedFormat)));
                assert_eq!(as_barras.unwrap().kind, BoletoKind::CodigoBarras44);
            }
            _ => {
                assert!(matches!(as_linha, Err(PixError::UnsupportedFormat)));
                assert!(matches!(as_barras, Err(PixError::UnsupportedFormat)));
            }
        }
    }
}

#[test]
fn test_factor_arithmetic_is_utc_calendar_days() {
    let epoch = NaiveDate::from_ymd_opt(1997, 10, 7).unwrap();
    let mut rng = rand::thread_rng();

    for factor in [1u32, 1000, 9999]
        .into_iter()
        .chain((0..100).map(|_| rng.gen_range(1..=9999)))
    {
        let parsed = decode(&BoletoInput::codigo_barras(common::barras(factor, 1))).unwrap();
        let expected = epoch + chrono::Days::new(factor as u64);
        assert_eq!(parsed.expiration_date, Some(expected), "factor {factor}");
    }

    let parsed = decode(&BoletoInput::linha_digitavel(common::linha(0, 1))).unwrap();
    assert_eq!(parsed.expiration_date, None);
}
