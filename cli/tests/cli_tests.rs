#[test]
fn stat() {
    trycmd::TestCases::new()
        .case("tests/stat/*.toml")
        .env("SSTATS_ALLOW_STDIN", "true")
        .default_bin_name("sstats");
}
