use crate::frame::frame_len;

/// Swap the first and third byte of every pixel in place
///
/// Turns BGR into RGB and back. Only the first `width * height` pixels are
/// touched; panics if `buf` is shorter than that.
pub fn swap_red_blue(buf: &mut [u8], width: u32, height: u32) {
    let len = frame_len(width, height);
    for pixel in buf[..len].chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_outer_channels_only() {
        let mut buf = vec![10, 20, 30, 40, 50, 60];
        swap_red_blue(&mut buf, 2, 1);
        assert_eq!(buf, vec![30, 20, 10, 60, 50, 40]);
    }

    #[test]
    fn applying_twice_restores_original() {
        for (width, height) in [(1, 1), (1, 7), (5, 1), (3, 4), (16, 9)] {
            let original: Vec<u8> = (0..frame_len(width, height))
                .map(|i| (i * 37 % 251) as u8)
                .collect();
            let mut buf = original.clone();
            swap_red_blue(&mut buf, width, height);
            assert_ne!(buf, original, "{width}x{height}");
            swap_red_blue(&mut buf, width, height);
            assert_eq!(buf, original, "{width}x{height}");
        }
    }

    #[test]
    fn trailing_bytes_beyond_frame_are_untouched() {
        let mut buf = vec![1, 2, 3, 9, 9];
        swap_red_blue(&mut buf, 1, 1);
        assert_eq!(buf, vec![3, 2, 1, 9, 9]);
    }

    #[test]
    #[should_panic]
    fn short_buffer_panics() {
        let mut buf = vec![0; 5];
        swap_red_blue(&mut buf, 2, 1);
    }
}
