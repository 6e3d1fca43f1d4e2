//! Exact packing feasibility.

use crate::models::Vehicle;

/// Returns `true` if every vehicle can be placed in one of the bins without
/// any bin's summed vehicle length exceeding its capacity.
///
/// Bins may stay empty. Exhaustive backtracking, largest vehicle first;
/// intended for the small multisets a request carries.
///
/// # Examples
///
/// ```
/// use u_storage::evaluation::can_pack;
/// use u_storage::models::Vehicle;
///
/// let vehicles = vec![Vehicle::new(15), Vehicle::new(15)];
/// assert!(can_pack(&vehicles, &[15, 15]));
/// assert!(!can_pack(&vehicles, &[20, 10]));
/// ```
pub fn can_pack(vehicles: &[Vehicle], capacities: &[u32]) -> bool {
    let mut lengths: Vec<u32> = vehicles.iter().map(Vehicle::length).collect();
    lengths.sort_by(|a, b| b.cmp(a));
    let mut remaining = capacities.to_vec();
    place(&lengths, &mut remaining)
}

fn place(lengths: &[u32], remaining: &mut [u32]) -> bool {
    let Some((&need, rest)) = lengths.split_first() else {
        return true;
    };
    for i in 0..remaining.len() {
        // Bins with identical remaining capacity are interchangeable.
        if remaining[i] < need || remaining[..i].contains(&remaining[i]) {
            continue;
        }
        remaining[i] -= need;
        let placed = place(rest, remaining);
        remaining[i] += need;
        if placed {
            return true;
        }
    }
    false
}
