#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use quartet::{Genotype, PerMember, VariantSite};
use rust_htslib::bcf::{self, Format, Read};
use tempfile::NamedTempFile;

pub const VCF_HEADER: &str = "\
##fileformat=VCFv4.2
##FILTER=<ID=PASS,Description=\"All filters passed\">
##FILTER=<ID=LowQual,Description=\"Low quality\">
##FILTER=<ID=q10,Description=\"Quality below 10\">
##contig=<ID=chr1,length=1000000>
##contig=<ID=chr2,length=1000000>
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=GQ,Number=1,Type=Integer,Description=\"Genotype quality\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tDAD\tMOM\tKID1\tKID2
";

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("QUARTET_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set QUARTET_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Genotypes in father, mother, child1, child2 order from `GT` strings.
pub fn genotypes(gts: [&str; 4]) -> PerMember<Genotype> {
    let [father, mother, child1, child2] = gts.map(|gt| Genotype::parse(gt).expect("valid GT"));
    PerMember::new(father, mother, child1, child2)
}

/// Classified site at `chrom:position` from `GT` strings.
pub fn site(chrom: &str, position: u64, gts: [&str; 4]) -> VariantSite {
    VariantSite::new(chrom, position, "A", "G", genotypes(gts)).expect("classifiable genotypes")
}

/// Every unphased biallelic genotype.
pub fn all_genotypes() -> [Genotype; 3] {
    [Genotype::hom_ref(), Genotype::het(), Genotype::hom_alt()]
}

/// Plain-text VCF with the DAD/MOM/KID1/KID2 header and `records` as data lines.
pub fn write_vcf(records: &[&str]) -> NamedTempFile {
    write_vcf_with_header(VCF_HEADER, records)
}

pub fn write_vcf_with_header(header: &str, records: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp VCF");
    file.write_all(header.as_bytes()).expect("write VCF header");
    for record in records {
        writeln!(file, "{record}").expect("write VCF record");
    }
    file.flush().expect("flush VCF");
    file
}

/// Copy a plain VCF through htslib into another encoding.
pub fn recode(plain: &Path, format: Format, compress: bool) -> NamedTempFile {
    let mut reader = bcf::Reader::from_path(plain).expect("open plain VCF");
    let header = bcf::Header::from_template(reader.header());
    let file = NamedTempFile::new().expect("create temp output");
    {
        let mut writer = bcf::Writer::from_path(file.path(), &header, !compress, format)
            .expect("create writer");
        for record in reader.records() {
            let mut record = record.expect("readable record");
            writer.translate(&mut record);
            writer.write(&record).expect("write record");
        }
    }
    file
}
