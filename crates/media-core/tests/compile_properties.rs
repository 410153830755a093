//! Stream invariants that must hold for any script

mod common;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use proptest::prelude::*;
use sipcap_media_core::{MediaConfig, MediaScript, SampleSource, SampleSourceOpener, StepAction};
use sipcap_rtp_core::{DTMF_PAYLOAD_TYPE, PCMU_PAYLOAD_TYPE};

/// Opens `play:<n>` as a synthetic tone of `n` samples
#[derive(Default)]
struct ToneOpener {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl SampleSourceOpener for ToneOpener {
    fn open(&self, path: &Path) -> sipcap_media_core::Result<Box<dyn SampleSource>> {
        let samples = path.to_string_lossy().parse().unwrap_or(0);
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ToneSource {
            samples,
            position: 0,
            closed: self.closed.clone(),
        }))
    }
}

struct ToneSource {
    samples: u64,
    position: u64,
    closed: Arc<AtomicUsize>,
}

impl SampleSource for ToneSource {
    fn sample_rate(&self) -> u32 {
        8000
    }

    fn total_sample_frames(&self) -> u64 {
        self.samples
    }

    fn read_chunk(&mut self, count: usize) -> sipcap_media_core::Result<Vec<i16>> {
        let start = self.position;
        self.position += count as u64;
        Ok((start..start + count as u64).map(|i| if i % 2 == 0 { 4000 } else { -4000 }).collect())
    }
}

impl Drop for ToneSource {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..300).prop_map(|ms| format!("silence:{}", ms)),
        prop::sample::select(vec!['0', '5', '9', '*', '#', 'A', 'd']).prop_map(|d| format!("dtmf:{}", d)),
        (0u64..2400).prop_map(|samples| format!("play:{}", samples)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stream_invariants(tokens in prop::collection::vec(token(), 0..12)) {
        let script = MediaScript::from_tokens(&tokens).unwrap();
        let opener = ToneOpener::default();
        let (opened, closed) = (opener.opened.clone(), opener.closed.clone());
        let capture = pinned_compiler(MediaConfig::default())
            .with_sample_opener(opener)
            .compile(&script)
            .unwrap();
        let frames = rtp_frames(&capture);

        let expected: usize = script
            .steps()
            .iter()
            .map(|step| match step.action() {
                StepAction::Silence => step.value().parse::<usize>().unwrap() / 20,
                // 160 samples per 20ms frame at 8kHz
                StepAction::Play => step.value().parse::<usize>().unwrap() / 160,
                StepAction::Dtmf => 10,
            })
            .sum();
        prop_assert_eq!(frames.len(), expected);

        let plays = script.steps().iter().filter(|s| s.action() == StepAction::Play).count();
        prop_assert_eq!(opened.load(Ordering::SeqCst), plays);
        prop_assert_eq!(closed.load(Ordering::SeqCst), plays);

        let mut previous_ts = 0u32;
        let mut previous_was_last_dtmf = false;
        for (i, frame) in frames.iter().enumerate() {
            prop_assert_eq!(frame.header.sequence_number as usize, (i + 1) % 65536);
            prop_assert_eq!(frame.header.ssrc, SSRC);
            prop_assert_eq!(frame.header.marker, i == 0);
            if frame.header.payload_type == PCMU_PAYLOAD_TYPE {
                prop_assert_eq!(frame.payload.len(), 160);
            }

            let step = frame.header.timestamp.wrapping_sub(previous_ts);
            if previous_was_last_dtmf {
                prop_assert_eq!(step, 160 * 11);
            } else {
                prop_assert_eq!(step, 160);
            }
            previous_ts = frame.header.timestamp;
            previous_was_last_dtmf =
                frame.header.payload_type == DTMF_PAYLOAD_TYPE && frame.payload[1] & 0x80 != 0;
        }

        let records = capture.records();
        for pair in records.windows(2) {
            prop_assert!(pair[0].timestamp_micros_total() <= pair[1].timestamp_micros_total());
        }
        if let Some(last) = records.last() {
            let elapsed = last.timestamp_micros_total() - START_SECS * 1_000_000;
            prop_assert_eq!(elapsed, frames.len() as u64 * 20_000);
        }
    }
}
