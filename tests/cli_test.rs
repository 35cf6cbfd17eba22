use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_decode_linha_digitavel() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("boleto-pix"));
    cmd.args(["decode", "--linha-digitavel", &common::linha(1, 12345)]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"LINHA_DIGITAVEL_47\""))
        .stdout(predicate::str::contains("\"amount\": 123.45"))
        .stdout(predicate::str::contains(
            "\"expirationDate\": \"1997-10-08T00:00:00.000Z\"",
        ));

    Ok(())
}

#[test]
fn test_decode_barras_without_due_date() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("boleto-pix"));
    cmd.args(["decode", "--codigo-barras", &common::barras(0, 0)]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"CODIGO_BARRAS_44\""))
        .stdout(predicate::str::contains("\"expirationDate\": null"));

    Ok(())
}

#[test]
fn test_decode_rejects_concessionaria() {
    let mut cmd = Command::new(cargo_bin!("boleto-pix"));
    cmd.args(["decode", "--linha-digitavel", &"8".repeat(48)]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported boleto format"));
}

#[test]
fn test_convert_end_to_end() {
    let mut cmd = Command::new(cargo_bin!("boleto-pix"));
    cmd.args([
        "convert",
        "--codigo-barras",
        &common::barras(1000, 0),
        "--amount-override",
        "10.005",
        "--pix-key",
        "loja@example.com",
        "--merchant-name",
        "Loja do Bairro",
        "--merchant-city",
        "Sao Paulo",
        "--payer-name",
        "Maria",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 10.01"))
        .stdout(predicate::str::contains("\"message\": \"Pagador: Maria\""))
        .stdout(predicate::str::contains("\"city\": \"SAO PAULO\""))
        .stdout(predicate::str::contains("\"payload\": \"000201"))
        .stdout(predicate::str::contains("data:image/png;base64,"));
}

#[test]
fn test_convert_zero_amount_fails() {
    let mut cmd = Command::new(cargo_bin!("boleto-pix"));
    cmd.args([
        "convert",
        "--linha-digitavel",
        &common::linha(1000, 0),
        "--pix-key",
        "loja@example.com",
        "--merchant-name",
        "Loja do Bairro",
        "--merchant-city",
        "Recife",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("amountOverride > 0"));
}
