/// Default amplitude below which a sample counts as silent, in normalized
/// units. Tuned for trimming room tone ahead of recorded takes.
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.01;

/// Multi-channel audio as one normalized f32 vector per channel.
/// All channels hold the same number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames (one sample per channel per frame).
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// New buffer holding the suffix of every channel from `frame` on.
    ///
    /// `frame == frame_count()` yields a valid zero-frame buffer; sample
    /// rate and channel count carry over unchanged. The source buffer is
    /// left untouched.
    pub fn trim_from(&self, frame: usize) -> AudioBuffer {
        let channels = self
            .channels
            .iter()
            .map(|channel| channel[frame.min(channel.len())..].to_vec())
            .collect();
        AudioBuffer {
            sample_rate: self.sample_rate,
            channels,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SilenceDetector {
    threshold: f32,
}

impl SilenceDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn is_silent(&self, sample: f32) -> bool {
        sample.abs() <= self.threshold
    }

    /// Index of the first frame where any channel rises above the
    /// threshold. Returns `frame_count` when every frame is silent,
    /// including the zero-frame case.
    pub fn first_audible_frame(&self, buffer: &AudioBuffer) -> usize {
        let frames = buffer.frame_count();
        for frame in 0..frames {
            let audible = buffer
                .channels
                .iter()
                .any(|channel| !self.is_silent(channel[frame]));
            if audible {
                return frame;
            }
        }
        frames
    }
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo(left: Vec<f32>, right: Vec<f32>) -> AudioBuffer {
        AudioBuffer::new(44_100, vec![left, right])
    }

    #[test]
    fn test_all_silent_returns_frame_count() {
        let buffer = stereo(vec![0.0, 0.005, -0.009], vec![0.002, 0.0, 0.01]);
        let detector = SilenceDetector::default();
        assert_eq!(detector.first_audible_frame(&buffer), 3);
    }

    #[test]
    fn test_zero_frames_returns_zero() {
        let buffer = stereo(vec![], vec![]);
        let detector = SilenceDetector::default();
        assert_eq!(detector.first_audible_frame(&buffer), 0);
        assert_eq!(buffer.frame_count(), 0);
    }

    #[test]
    fn test_returns_first_audible_index() {
        let buffer = stereo(vec![0.0, 0.0, 0.5, 0.0], vec![0.0, 0.0, 0.0, 0.5]);
        let detector = SilenceDetector::default();
        assert_eq!(detector.first_audible_frame(&buffer), 2);
    }

    #[test]
    fn test_any_channel_can_hold_the_exceedance() {
        let in_left = stereo(vec![0.0, 0.5, 0.0], vec![0.0, 0.0, 0.0]);
        let in_right = stereo(vec![0.0, 0.0, 0.0], vec![0.0, 0.5, 0.0]);
        let detector = SilenceDetector::default();
        assert_eq!(detector.first_audible_frame(&in_left), 1);
        assert_eq!(detector.first_audible_frame(&in_right), 1);
    }

    #[test]
    fn test_amplitude_equal_to_threshold_is_silent() {
        let detector = SilenceDetector::new(0.01);
        assert!(detector.is_silent(0.01));
        assert!(detector.is_silent(-0.01));
        assert!(!detector.is_silent(0.0100001));
    }

    #[test]
    fn test_negative_samples_count_as_audible() {
        let buffer = AudioBuffer::new(8_000, vec![vec![0.0, -0.8, 0.0]]);
        let detector = SilenceDetector::default();
        assert_eq!(detector.first_audible_frame(&buffer), 1);
    }

    #[test]
    fn test_trim_returns_exact_suffix() {
        let buffer = stereo(vec![0.1, 0.2, 0.3, 0.4], vec![0.5, 0.6, 0.7, 0.8]);
        let trimmed = buffer.trim_from(2);
        assert_eq!(trimmed.channels[0], vec![0.3, 0.4]);
        assert_eq!(trimmed.channels[1], vec![0.7, 0.8]);
    }

    #[test]
    fn test_trim_at_zero_copies_everything() {
        let buffer = stereo(vec![0.1, 0.2], vec![0.3, 0.4]);
        let trimmed = buffer.trim_from(0);
        assert_eq!(trimmed, buffer);
    }

    #[test]
    fn test_trim_at_frame_count_is_empty() {
        let buffer = stereo(vec![0.1, 0.2], vec![0.3, 0.4]);
        let trimmed = buffer.trim_from(buffer.frame_count());
        assert_eq!(trimmed.frame_count(), 0);
        assert_eq!(trimmed.channel_count(), 2);
        assert_eq!(trimmed.sample_rate, 44_100);
    }

    #[test]
    fn test_trim_does_not_mutate_source() {
        let buffer = stereo(vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]);
        let before = buffer.clone();
        let _ = buffer.trim_from(2);
        assert_eq!(buffer, before);
    }
}
