mod common;

use camino::Utf8Path;
use common::FixtureFetcher;
use gcpd::report::render;

#[test]
fn test_report_of_ubv_document() {
    let gcpd = FixtureFetcher::default().into_gcpd();
    let result = gcpd
        .photometry_from_file("UBV", Utf8Path::new("tests/data/ubv_hd174881.html"))
        .unwrap();

    let report = render("HD174881", &result, true);
    let expected = "\
# data in UBV photometric system
M   HD174881 Johnson U 8.65 0.05 # Johnson U
M   HD174881 Johnson B 7.7 0.05 # Johnson B
M   HD174881 Johnson B 7.69 0.05 # Johnson B
M   HD174881 Johnson V 6.56 0.05 # Johnson V
M   HD174881 Johnson V 6.57 0.05 # Johnson V
# References:
#
# Author: Mermilliod J.-C.
# Journal: Institut d'Astronomie, Lausanne
# Title: Homogeneous means in the UBV system
# BibcodeURL: http://adsabs.harvard.edu/abs/1991hmuv.book.....M
#
# Author: Doe J.
# Journal: A&AS 12, 34
#
";
    assert_eq!(report, expected);
}

#[test]
fn test_report_without_references() {
    let gcpd = FixtureFetcher::default().into_gcpd();
    let result = gcpd
        .photometry_from_file("Alexander", Utf8Path::new("tests/data/alexander_hd37128.html"))
        .unwrap();

    let report = render("HD37128", &result, false);
    assert_eq!(report.lines().count(), 5);
    assert!(report.starts_with("# data in Alexander photometric system\n"));
    assert!(report.contains("M   HD37128 Alexander m683 7.17 0.05 # Alexander m683\n"));
    assert!(!report.contains("References"));
}
