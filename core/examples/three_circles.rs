use probsets_core::{EventStyle, SetsSpace};

fn main() {
    let mut space = SetsSpace::new("three circles");
    let circles = [("A", [0.35, 0.6], "red"), ("B", [0.65, 0.6], "green"), ("C", [0.5, 0.35], "blue")];
    for (name, loc, color) in circles {
        let style = EventStyle {
            fill_color: color.to_string(),
            text: name.to_string(),
            ..EventStyle::default()
        };
        if let Err(e) = space.add_ellipse(name, loc, 0.25, 0.25, 0.0, 16, style) {
            eprintln!("{}: {}", name, e);
            return;
        }
    }

    match space.partition() {
        Ok(partition) => {
            for cell in partition.cells() {
                println!(
                    "cell {:>2}  area {:.5}  at ({:.3}, {:.3})  {}",
                    cell.label,
                    cell.area,
                    cell.centroid[0],
                    cell.centroid[1],
                    cell.members.join(" & ")
                );
            }
        }
        Err(e) => eprintln!("partition failed: {}", e),
    }
}
