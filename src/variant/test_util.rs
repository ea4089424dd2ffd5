use std::io::Write;

use rust_htslib::bcf::{self, Read};
use tempfile::NamedTempFile;

pub(crate) const HEADER: &str = "\
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

/// Plain-text VCF holding `records` under the quartet header.
pub(crate) fn write_vcf(records: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    for record in records {
        writeln!(file, "{record}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub(crate) fn read_records(records: &[&str]) -> Vec<bcf::Record> {
    let file = write_vcf(records);
    let mut reader = bcf::Reader::from_path(file.path()).unwrap();
    reader.records().map(|record| record.unwrap()).collect()
}
