use alloc::vec::Vec;

use quickcheck::{QuickCheck, TestResult};

use super::property_tests;
use crate::{BinaryReader, MemorySource, Reader, ReaderOptions};

/// Property: whatever the cache capacity, source chunking and request sizes,
/// the reader hands out exactly the source bytes in order.
#[test]
fn chunked_read_fidelity_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, capacity: u8, max_read: u8, requests: Vec<u8>) -> TestResult {
        if requests.is_empty() {
            return TestResult::discard();
        }
        let mut source =
            MemorySource::from(data.clone()).with_max_read(usize::from(max_read).max(1));
        let mut reader = Reader::with_options(
            &mut source,
            ReaderOptions {
                capacity: usize::from(capacity),
                ..ReaderOptions::default()
            },
        );

        let mut out = Vec::with_capacity(data.len());
        let mut dest = [0u8; 256];
        for request in requests.iter().cycle() {
            if reader.is_eof() {
                break;
            }
            let request = usize::from(*request);
            if request % 3 == 0 {
                match reader.get() {
                    Ok(Some(byte)) => out.push(byte),
                    Ok(None) => {}
                    Err(_) => return TestResult::failed(),
                }
                continue;
            }
            match reader.read(&mut dest[..request]) {
                Ok(count) => out.extend_from_slice(&dest[..count]),
                Err(_) => return TestResult::failed(),
            }
        }
        TestResult::from_bool(out == data)
    }

    QuickCheck::new()
        .tests(property_tests())
        .quickcheck(prop as fn(Vec<u8>, u8, u8, Vec<u8>) -> TestResult);
}

/// Property: splitting on a delimiter returns the same pieces as
/// `slice::split`.
#[test]
fn read_until_matches_split_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, delimiter: u8, capacity: u8) -> bool {
        let mut source = MemorySource::from(data.clone());
        let mut reader = BinaryReader::with_options(
            &mut source,
            ReaderOptions {
                capacity: usize::from(capacity),
                ..ReaderOptions::default()
            },
        );

        let mut expected: Vec<&[u8]> = data.split(|&b| b == delimiter).collect();
        // A trailing delimiter ends the last piece rather than starting one.
        if data.last() == Some(&delimiter) {
            expected.pop();
        }
        for piece in expected {
            match reader.read_until(delimiter) {
                Ok(buffer) if buffer.as_slice() == piece => {}
                _ => return false,
            }
        }
        reader.read_until(delimiter).is_ok_and(|rest| rest.is_empty()) && reader.is_eof()
    }

    QuickCheck::new()
        .tests(property_tests())
        .quickcheck(prop as fn(Vec<u8>, u8, u8) -> bool);
}
