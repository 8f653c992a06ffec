use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn command_pipeline() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let workdir = temp.path().join("work");

    // cell1 and cell3 share their closest pair, cell4 has no positive distance
    let mut cmd = cargo_bin_cmd!("schic");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg("pipeline")
        .arg("tests/schic")
        .arg("-d")
        .arg(&workdir)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "\
Row,Column,ConservedInFiles
0,1,2
1,0,2
0,3,1
3,0,1
"
    );
    assert!(stderr.contains("cell4.txt. Skipping"));

    assert!(workdir.join("bottom1p/bottom1p_cell1.txt").is_file());
    assert!(workdir.join("binary/binary_bottom1p_cell3.txt").is_file());
    assert!(!workdir.join("binary/binary_bottom1p_cell4.txt").exists());

    Ok(())
}

#[test]
fn command_pipeline_min_count() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("conserved.csv");

    let mut cmd = cargo_bin_cmd!("schic");
    cmd.arg("pipeline")
        .arg("tests/schic/cell1.txt")
        .arg("tests/schic/cell2.txt")
        .arg("tests/schic/cell3.txt")
        .arg("-d")
        .arg(temp.path())
        .arg("--min-count")
        .arg("2")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let out = std::fs::read_to_string(&outfile)?;
    assert_eq!(out, "Row,Column,ConservedInFiles\n0,1,2\n1,0,2\n");

    Ok(())
}

#[test]
fn command_pipeline_all_skipped() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("schic");
    cmd.arg("pipeline")
        .arg("tests/schic/cell4.txt")
        .arg("-d")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));

    Ok(())
}

#[test]
fn command_pipeline_bad_file_still_reports() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bad = temp.path().join("ragged.txt");
    std::fs::write(&bad, "0 1 2\n1 0\n2 1 0\n")?;
    let outfile = temp.path().join("conserved.csv");

    let mut cmd = cargo_bin_cmd!("schic");
    cmd.env_remove("RUST_LOG")
        .arg("pipeline")
        .arg(&bad)
        .arg("tests/schic/cell1.txt")
        .arg("tests/schic/cell3.txt")
        .arg("-d")
        .arg(temp.path().join("work"))
        .arg("-o")
        .arg(&outfile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ragged.txt"))
        .stderr(predicate::str::contains("1 of 3 file(s) failed in bottom"));

    // the report covers the two readable cells
    let out = std::fs::read_to_string(&outfile)?;
    assert_eq!(out, "Row,Column,ConservedInFiles\n0,1,2\n1,0,2\n");

    Ok(())
}

#[test]
fn command_pipeline_same_names() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");
    std::fs::create_dir(&dir_a)?;
    std::fs::create_dir(&dir_b)?;
    std::fs::write(dir_a.join("cell.txt"), "0 1 5\n1 0 5\n5 5 0\n")?;
    std::fs::write(dir_b.join("cell.txt"), "0 5 5\n5 0 1\n5 1 0\n")?;
    let workdir = temp.path().join("work");

    let mut cmd = cargo_bin_cmd!("schic");
    cmd.arg("pipeline")
        .arg(&dir_a)
        .arg(&dir_b)
        .arg("-d")
        .arg(&workdir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("would both be written to"))
        .stderr(predicate::str::contains(dir_a.join("cell.txt").to_str().unwrap()))
        .stderr(predicate::str::contains(dir_b.join("cell.txt").to_str().unwrap()));

    // nothing was overwritten
    assert!(!workdir.join("bottom1p").join("bottom1p_cell.txt").exists());

    // renamed apart, each cell counts once
    std::fs::rename(dir_b.join("cell.txt"), dir_b.join("cell_b.txt"))?;
    let mut cmd = cargo_bin_cmd!("schic");
    cmd.arg("pipeline")
        .arg(&dir_a)
        .arg(&dir_b)
        .arg("-d")
        .arg(&workdir)
        .assert()
        .success()
        .stdout("Row,Column,ConservedInFiles\n0,1,1\n1,0,1\n1,2,1\n2,1,1\n");

    Ok(())
}
