//! Terminal output formatter

use carfinder_core::compose::format_brl;
use carfinder_core::CarRecord;

pub fn format_cars(cars: &[CarRecord]) -> String {
    if cars.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    for car in cars {
        let mut traits = Vec::new();
        if let Some(powertrain) = car.powertrain {
            traits.push(powertrain.as_str().to_string());
        }
        if let Some(body) = car.body {
            traits.push(body.as_str().to_string());
        }
        if let Some(seats) = car.seats {
            traits.push(format!("{} lugares", seats));
        }
        let traits = if traits.is_empty() {
            String::new()
        } else {
            format!(" [{}]", traits.join(", "))
        };
        output.push_str(&format!(
            "{} {} — R$ {} — {}{}\n",
            car.name,
            car.model,
            format_brl(car.price),
            car.location,
            traits
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfinder_core::{Body, CarImages, Powertrain};

    #[test]
    fn formats_one_line_per_car() {
        let car = CarRecord {
            name: "Honda".to_string(),
            model: "Civic".to_string(),
            images: CarImages {
                quarter: String::new(),
                side: String::new(),
                back: String::new(),
                interior: String::new(),
            },
            price: 129_900,
            location: "São Paulo".to_string(),
            powertrain: Some(Powertrain::Flex),
            body: Some(Body::Sedan),
            seats: Some(5),
            trunk_liters: None,
            tags: Vec::new(),
        };
        let output = format_cars(&[car]);
        assert_eq!(
            output,
            "Honda Civic — R$ 129.900 — São Paulo [flex, sedan, 5 lugares]\n"
        );
    }
}
