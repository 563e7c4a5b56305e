//! Small rasterization helpers for binary masks.

use super::buffer::MaskBuffer;

/// Fill every pixel whose centre offset from `(cx, cy)` is within `radius`.
pub fn fill_circle(mask: &mut MaskBuffer, cx: i64, cy: i64, radius: i64, value: f32) {
    let radius_sq = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius_sq {
                mask.set_checked(x, y, value);
            }
        }
    }
}

/// Fill the half-open rectangle `[x, x + width) × [y, y + height)`.
pub fn fill_rect(mask: &mut MaskBuffer, x: i64, y: i64, width: i64, height: i64, value: f32) {
    for py in y..y + height {
        for px in x..x + width {
            mask.set_checked(px, py, value);
        }
    }
}

/// Bresenham line between two pixel positions, inclusive.
pub fn draw_line(mask: &mut MaskBuffer, from: (i64, i64), to: (i64, i64), value: f32) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        mask.set_checked(x, y, value);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw the closed outline through `points`.
pub fn draw_polygon(mask: &mut MaskBuffer, points: &[(i64, i64)], value: f32) {
    for (i, &from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        draw_line(mask, from, to, value);
    }
}

/// 4-connected fill from `seed`, stopping at pixels equal to `border`.
pub fn flood_fill(mask: &mut MaskBuffer, seed: (i64, i64), fill: f32, border: f32) {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let mut stack = vec![seed];
    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        let current = mask.get(x as usize, y as usize);
        if current == border || current == fill {
            continue;
        }
        mask.set(x as usize, y as usize, fill);
        stack.extend_from_slice(&[(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
    }
}
