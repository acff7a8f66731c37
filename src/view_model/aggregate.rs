use super::Facet;
use crate::models::{Course, CourseStatus, Order, OrderStatus, Resource};
use std::collections::BTreeMap;

/// Number of records per facet bucket. Records without a value are skipped.
pub(crate) fn count_by<R: Resource>(records: &[R], facet: Facet) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in records.iter().filter_map(|r| r.facet(facet)) {
        if value.trim().is_empty() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

pub(crate) fn sum_where<T>(
    records: &[T],
    value: impl Fn(&T) -> f64,
    include: impl Fn(&T) -> bool,
) -> f64 {
    records.iter().filter(|r| include(*r)).map(value).sum()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OrderStats {
    pub total_orders: usize,
    /// Sum of `totalAmount` over completed orders only.
    pub total_revenue: f64,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub refunded: usize,
    pub failed: usize,
}

impl OrderStats {
    pub fn average_order_value(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_revenue / self.completed as f64
        }
    }
}

pub(crate) fn order_stats(orders: &[Order]) -> OrderStats {
    let mut stats = OrderStats {
        total_orders: orders.len(),
        total_revenue: sum_where(
            orders,
            |o| o.total_amount,
            |o| o.status == OrderStatus::Completed,
        ),
        ..OrderStats::default()
    };

    for order in orders {
        match order.status {
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::Processing => stats.processing += 1,
            OrderStatus::Completed => stats.completed += 1,
            OrderStatus::Cancelled => stats.cancelled += 1,
            OrderStatus::Refunded => stats.refunded += 1,
            OrderStatus::Failed => stats.failed += 1,
            OrderStatus::Unknown => {}
        }
    }

    stats
}

/// Completed revenue per `YYYY-MM`, oldest month first.
pub(crate) fn revenue_by_month(orders: &[Order]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
    {
        let created = order.created_at.trim();
        if created.len() < 7 || !created.is_char_boundary(7) {
            continue;
        }
        *months.entry(created[..7].to_string()).or_insert(0.0) += order.total_amount;
    }
    months.into_iter().collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CatalogStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub total_enrollments: u64,
    /// Mean rating over courses that have been rated at all.
    pub average_rating: f64,
}

pub(crate) fn course_stats(courses: &[Course]) -> CatalogStats {
    let rated: Vec<f64> = courses
        .iter()
        .map(|c| c.rating)
        .filter(|r| *r > 0.0)
        .collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    CatalogStats {
        total: courses.len(),
        approved: courses
            .iter()
            .filter(|c| c.status == CourseStatus::Approved)
            .count(),
        pending: courses
            .iter()
            .filter(|c| c.status == CourseStatus::Pending)
            .count(),
        total_enrollments: courses.iter().map(|c| c.total_enrollments).sum(),
        average_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, status: &str, total: f64, created_at: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "status": status,
            "totalAmount": total,
            "createdAt": created_at,
        }))
        .expect("order fixture")
    }

    #[test]
    fn test_order_stats_example() {
        let orders = vec![
            order("1", "completed", 500.0, ""),
            order("2", "pending", 300.0, ""),
            order("3", "completed", 200.0, ""),
        ];
        let stats = order_stats(&orders);
        assert_eq!(stats.total_revenue, 700.0);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.average_order_value(), 350.0);
    }

    #[test]
    fn test_order_stats_empty() {
        let stats = order_stats(&[]);
        assert_eq!(stats, OrderStats::default());
        assert_eq!(stats.average_order_value(), 0.0);
    }

    #[test]
    fn test_count_by_status() {
        let orders = vec![
            order("1", "completed", 1.0, ""),
            order("2", "pending", 1.0, ""),
            order("3", "completed", 1.0, ""),
        ];
        let counts = count_by(&orders, Facet::Status);
        assert_eq!(counts.get("completed"), Some(&2));
        assert_eq!(counts.get("pending"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_revenue_by_month_groups_completed_only() {
        let orders = vec![
            order("1", "completed", 100.0, "2024-02-03T00:00:00Z"),
            order("2", "completed", 50.0, "2024-01-20T00:00:00Z"),
            order("3", "pending", 999.0, "2024-01-21T00:00:00Z"),
            order("4", "completed", 25.0, "2024-02-28T00:00:00Z"),
            order("5", "completed", 10.0, ""),
        ];
        assert_eq!(
            revenue_by_month(&orders),
            vec![("2024-01".to_string(), 50.0), ("2024-02".to_string(), 125.0)]
        );
    }

    #[test]
    fn test_course_stats_ignores_unrated() {
        let courses: Vec<Course> = serde_json::from_value(serde_json::json!([
            {"_id": "1", "title": "a", "status": "approved", "rating": 4.0, "totalEnrollments": 3},
            {"_id": "2", "title": "b", "status": "pending", "rating": 0, "totalEnrollments": 2},
            {"_id": "3", "title": "c", "status": "approved", "rating": 5.0}
        ]))
        .expect("course fixtures");
        let stats = course_stats(&courses);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_enrollments, 5);
        assert_eq!(stats.average_rating, 4.5);
    }
}
