use num_traits::Float;

pub(crate) fn squared_euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)) * ((*x) - (*y)))
        .fold(T::zero(), std::ops::Add::add)
}

pub(crate) fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    squared_euclidean_distance(a, b).sqrt()
}
